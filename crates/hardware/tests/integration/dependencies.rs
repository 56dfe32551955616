//! # Data Dependency Tests
//!
//! Results must not depend on the width or on cascading; only timing may.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{BASE, ProgramBuilder, TestContext, asm, program};

fn raw_chain() -> rvwide_core::Program {
    program(&[
        asm::addi(1, 0, 1),
        asm::add(1, 1, 1),
        asm::add(1, 1, 1),
        asm::add(1, 1, 1),
        asm::add(1, 1, 1),
        asm::addi(10, 1, 0),
    ])
}

#[rstest]
fn raw_chain_doubles(
    #[values(1, 2, 3, 4, 8, 32)] width: usize,
    #[values(false, true)] cascade: bool,
) {
    let ctx = TestContext::new().width(width).cascade(cascade);
    let sim = ctx.run(&raw_chain());
    let cpu = sim.pipeline().cpu();
    assert_eq!(cpu.regs.read(1), 16);
    assert_eq!(cpu.exit_code(), Some(16));
    assert!(ctx.tandem(&raw_chain()).passed());
}

#[test]
fn dependent_ops_split_wide_bundles() {
    let ctx = TestContext::new().width(4);
    let sim = ctx.run(&raw_chain());
    assert!(sim.stats().bundle_splits > 0);
    assert!(sim.stats().forwarded_operands > 0);
    assert_eq!(sim.stats().cascaded_operands, 0);
}

#[test]
fn cascading_reads_older_lanes() {
    let ctx = TestContext::new().width(4).cascade(true);
    let sim = ctx.run(&raw_chain());
    assert!(sim.stats().cascaded_operands > 0);

    let plain = TestContext::new().width(4).run(&raw_chain());
    assert!(sim.stats().cycles <= plain.stats().cycles);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
fn load_use_stalls_exactly_once(#[case] width: usize) {
    const DATA: u32 = 0x1234_5678;
    // lw x2, 0(x1) with x1 pointing at the data word; x1 is non-zero before
    // the load, so a stale read of x2 or the load address would show.
    let image = ProgramBuilder::new()
        .insts(&[asm::auipc(1, 0), asm::addi(1, 1, 24), asm::lw(2, 1, 0), asm::add(3, 2, 1)])
        .exit()
        .data(&DATA.to_le_bytes())
        .build();
    let ctx = TestContext::new().width(width);
    let sim = ctx.run(&image);
    let regs = sim.outcome().registers;
    assert_eq!(sim.stats().stalls_data, 1);
    assert_eq!(regs[1], BASE + 24);
    assert_eq!(regs[2], u64::from(DATA));
    assert_eq!(regs[3], u64::from(DATA) + BASE + 24);
    assert!(ctx.tandem(&image).passed());
}

#[test]
fn store_then_load_sees_the_value() {
    let image = program(&[
        asm::auipc(5, 0),
        asm::addi(6, 0, -2),
        asm::sd(6, 5, 256),
        asm::lw(7, 5, 256),
        asm::lbu(8, 5, 257),
        asm::add(10, 7, 8),
    ]);
    for width in [1, 2, 4] {
        let ctx = TestContext::new().width(width);
        let cpu_regs = ctx.run(&image).outcome().registers;
        assert_eq!(cpu_regs[7], u64::MAX - 1);
        assert_eq!(cpu_regs[8], 0xFF);
        assert!(ctx.tandem(&image).passed());
    }
}

#[rstest]
fn waw_keeps_the_younger_write(#[values(1, 2, 4)] width: usize, #[values(false, true)] cascade: bool) {
    let image = program(&[asm::addi(2, 0, 10), asm::addi(2, 0, 20), asm::addi(10, 2, 0)]);
    let ctx = TestContext::new().width(width).cascade(cascade);
    assert_eq!(ctx.run(&image).outcome().registers[2], 20);
    assert!(ctx.tandem(&image).passed());
}

#[test]
fn zero_register_is_never_written_or_forwarded() {
    let image = program(&[
        asm::addi(0, 0, 5),
        asm::addi(1, 0, 1),
        asm::add(3, 0, 0),
        asm::addi(10, 1, 0),
    ]);
    for cascade in [false, true] {
        let ctx = TestContext::new().width(4).cascade(cascade);
        let regs = ctx.run(&image).outcome().registers;
        assert_eq!(regs[0], 0);
        assert_eq!(regs[1], 1);
        assert_eq!(regs[3], 0);
    }
}
