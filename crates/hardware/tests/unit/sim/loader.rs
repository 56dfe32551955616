//! # Loader Tests
//!
//! In-memory images, flat binaries read through `tempfile` and hand-built
//! ELF64 executables.

use std::io::Write;

use pretty_assertions::assert_eq;
use rvwide_core::common::error::AccessKind;
use rvwide_core::sim::loader::{LoadError, Program, Segment};
use rvwide_core::soc::{Memory, MemoryBus};

const BASE: u64 = 0x8000_0000;
const EM_RISCV: u16 = 243;
const EM_X86_64: u16 = 62;
const EHDR_SIZE: usize = 64;
const PHDR_SIZE: usize = 56;

/// Minimal ELF64 executable with one `PT_LOAD` segment placed right after
/// the program header.
fn elf(machine: u16, entry: u64, vaddr: u64, code: &[u8], mem_size: u64) -> Vec<u8> {
    let offset = (EHDR_SIZE + PHDR_SIZE) as u64;
    let mut out = Vec::new();
    out.extend_from_slice(&[0x7F, b'E', b'L', b'F', 2, 1, 1, 0]);
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(&2u16.to_le_bytes()); // ET_EXEC
    out.extend_from_slice(&machine.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&entry.to_le_bytes());
    out.extend_from_slice(&(EHDR_SIZE as u64).to_le_bytes()); // e_phoff
    out.extend_from_slice(&0u64.to_le_bytes()); // e_shoff
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(EHDR_SIZE as u16).to_le_bytes());
    out.extend_from_slice(&(PHDR_SIZE as u16).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&[0; 6]);
    assert_eq!(out.len(), EHDR_SIZE);

    out.extend_from_slice(&1u32.to_le_bytes()); // PT_LOAD
    out.extend_from_slice(&5u32.to_le_bytes()); // R+X
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&vaddr.to_le_bytes());
    out.extend_from_slice(&vaddr.to_le_bytes());
    out.extend_from_slice(&(code.len() as u64).to_le_bytes());
    out.extend_from_slice(&mem_size.to_le_bytes());
    out.extend_from_slice(&4u64.to_le_bytes());
    assert_eq!(out.len() as u64, offset);

    out.extend_from_slice(code);
    out
}

#[test]
fn from_words_is_little_endian() {
    let program = Program::from_words(BASE, &[0x0070_0513, 0x0000_0073]);
    assert_eq!(program.entry, BASE);
    assert_eq!(
        program.segments,
        vec![Segment {
            addr: BASE,
            data: vec![0x13, 0x05, 0x70, 0x00, 0x73, 0x00, 0x00, 0x00],
        }]
    );
    assert_eq!(program.len(), 8);
    assert!(!program.is_empty());
}

#[test]
fn empty_image() {
    let program = Program::from_bytes(BASE, Vec::new());
    assert!(program.is_empty());
    assert_eq!(program.len(), 0);
}

#[test]
fn load_into_writes_every_segment() {
    let program = Program {
        entry: BASE,
        segments: vec![
            Segment {
                addr: BASE,
                data: vec![1, 2],
            },
            Segment {
                addr: BASE + 32,
                data: vec![3],
            },
        ],
    };
    let mut mem = Memory::new(BASE, 64);
    program.load_into(&mut mem).unwrap();
    assert_eq!(mem.read_u16(BASE).unwrap(), 0x0201);
    assert_eq!(mem.read_u8(BASE + 32).unwrap(), 3);
}

#[test]
fn load_into_reports_store_fault() {
    let program = Program::from_bytes(BASE + 60, vec![0; 8]);
    let mut mem = Memory::new(BASE, 64);
    let fault = program.load_into(&mut mem).unwrap_err();
    assert_eq!(fault.addr, BASE + 60);
    assert_eq!(fault.size, 8);
    assert_eq!(fault.kind, AccessKind::Store);
}

#[test]
fn flat_binary_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0x13, 0x00, 0x00, 0x00]).unwrap();
    file.flush().unwrap();

    let program = Program::load_binary(file.path(), BASE).unwrap();
    assert_eq!(program, Program::from_words(BASE, &[0x0000_0013]));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.bin");
    let err = Program::load_binary(&path, BASE).unwrap_err();
    match err {
        LoadError::Io { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        Program::load_elf(&path),
        Err(LoadError::Io { .. })
    ));
}

#[test]
fn elf_segments_and_entry() {
    let code = [0x13, 0x05, 0x70, 0x00];
    let image = elf(EM_RISCV, BASE + 4, BASE, &code, 16);
    let program = Program::from_elf(&image).unwrap();

    assert_eq!(program.entry, BASE + 4);
    assert_eq!(program.segments.len(), 1);
    let seg = &program.segments[0];
    assert_eq!(seg.addr, BASE);
    assert_eq!(seg.data.len(), 16);
    assert_eq!(&seg.data[..4], &code);
    assert!(seg.data[4..].iter().all(|&b| b == 0));
}

#[test]
fn elf_from_disk() {
    let image = elf(EM_RISCV, BASE, BASE, &[0x73, 0, 0, 0], 4);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&image).unwrap();
    file.flush().unwrap();
    assert_eq!(Program::load_elf(file.path()).unwrap().entry, BASE);
}

#[test]
fn foreign_elf_is_rejected() {
    let image = elf(EM_X86_64, BASE, BASE, &[0x90; 4], 4);
    assert!(matches!(
        Program::from_elf(&image),
        Err(LoadError::Architecture(_))
    ));
}

#[test]
fn garbage_is_not_elf() {
    assert!(matches!(
        Program::from_elf(b"definitely not an object file"),
        Err(LoadError::Elf(_))
    ));
}

#[test]
fn elf_without_loadable_bytes_is_empty() {
    let image = elf(EM_RISCV, BASE, BASE, &[], 0);
    assert!(matches!(Program::from_elf(&image), Err(LoadError::Empty)));
}

#[test]
fn oversized_elf_segment_is_rejected() {
    let image = elf(EM_RISCV, BASE, BASE, &[0x73, 0, 0, 0], 1 << 62);
    assert!(matches!(
        Program::from_elf(&image),
        Err(LoadError::SegmentTooLarge { addr: BASE, size }) if size == 1 << 62
    ));
}
