//! # Branch Target Buffer Tests
//!
//! Lookup/update semantics, full-PC tagging and eviction on aliasing.

use rvwide_core::core::units::bru::btb::Btb;

#[test]
fn lookup_empty_returns_none() {
    let btb = Btb::new(16);
    assert_eq!(btb.lookup(0x8000_0000), None);
}

#[test]
fn update_then_lookup() {
    let mut btb = Btb::new(16);
    btb.update(0x8000_0000, 0x8000_0100);
    assert_eq!(btb.lookup(0x8000_0000), Some(0x8000_0100));
}

#[test]
fn latest_update_wins() {
    let mut btb = Btb::new(16);
    btb.update(0x1000, 0x2000);
    btb.update(0x1000, 0x3000);
    assert_eq!(btb.lookup(0x1000), Some(0x3000));
}

#[test]
fn compressed_neighbours_use_distinct_entries() {
    let mut btb = Btb::new(16);
    btb.update(0x1000, 0xA);
    btb.update(0x1002, 0xB);
    assert_eq!(btb.lookup(0x1000), Some(0xA));
    assert_eq!(btb.lookup(0x1002), Some(0xB));
}

#[test]
fn aliasing_pc_misses_on_tag() {
    let mut btb = Btb::new(4);
    btb.update(0x1000, 0x2000);
    // Same index (pc >> 1 masked to two bits), different tag.
    assert_eq!(btb.lookup(0x1008), None);
}

#[test]
fn aliasing_update_evicts() {
    let mut btb = Btb::new(4);
    btb.update(0x1000, 0x2000);
    btb.update(0x1008, 0x3000);
    assert_eq!(btb.lookup(0x1000), None);
    assert_eq!(btb.lookup(0x1008), Some(0x3000));
}
