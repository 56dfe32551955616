//! # Compute Unit Tests
//!
//! The pure `compute` function shared by Execute and the reference model,
//! and the sequential `execute` step built on it.

use pretty_assertions::assert_eq;
use rvwide_core::common::error::SimError;
use rvwide_core::config::Config;
use rvwide_core::core::Cpu;
use rvwide_core::core::cpu::Halt;
use rvwide_core::core::units::compute::{BranchOutcome, ComputeUnit};
use rvwide_core::isa::decode::{Decoded, decode};
use rvwide_core::sim::loader::Program;
use rvwide_core::soc::traits::MemoryBus;

use crate::common::{BASE, asm};

const PC: u64 = 0x8000_0010;

fn d(raw: u32) -> Decoded {
    decode(raw).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. compute
// ══════════════════════════════════════════════════════════

#[test]
fn alu_immediate() {
    let r = ComputeUnit::compute(&d(asm::addi(1, 2, -5)), PC, 4, 10, 99);
    assert_eq!(r.alu_result, 5);
    assert_eq!(r.branch, None);
    assert_eq!(r.next_pc(PC, 4), PC + 4);
}

#[test]
fn upper_immediates() {
    assert_eq!(
        ComputeUnit::compute(&d(asm::lui(1, 0x12345)), PC, 4, 7, 7).alu_result,
        0x1234_5000
    );
    assert_eq!(
        ComputeUnit::compute(&d(asm::auipc(1, 1)), PC, 4, 7, 7).alu_result,
        PC + 0x1000
    );
}

#[test]
fn taken_branch() {
    let r = ComputeUnit::compute(&d(asm::beq(1, 2, -16)), PC, 4, 3, 3);
    assert_eq!(
        r.branch,
        Some(BranchOutcome {
            taken: true,
            target: PC - 16
        })
    );
    assert_eq!(r.next_pc(PC, 4), PC - 16);
}

#[test]
fn not_taken_branch_falls_through_by_size() {
    let r = ComputeUnit::compute(&d(asm::bne(1, 2, 64)), PC, 2, 3, 3);
    assert_eq!(r.branch.map(|b| b.taken), Some(false));
    assert_eq!(r.next_pc(PC, 2), PC + 2);
}

#[test]
fn signed_and_unsigned_compares() {
    let neg = (-1_i64) as u64;
    assert!(ComputeUnit::compute(&d(asm::blt(1, 2, 8)), PC, 4, neg, 0).branch.unwrap().taken);
    assert!(!ComputeUnit::compute(&d(asm::bltu(1, 2, 8)), PC, 4, neg, 0).branch.unwrap().taken);
    assert!(ComputeUnit::compute(&d(asm::bge(1, 2, 8)), PC, 4, 0, neg).branch.unwrap().taken);
    assert!(ComputeUnit::compute(&d(asm::bgeu(1, 2, 8)), PC, 4, neg, 0).branch.unwrap().taken);
}

#[test]
fn jal_links_past_its_own_size() {
    let r = ComputeUnit::compute(&d(asm::jal(1, 32)), PC, 4, 0, 0);
    assert_eq!(r.alu_result, PC + 4);
    assert_eq!(r.next_pc(PC, 4), PC + 32);

    let compressed = ComputeUnit::compute(&d(asm::jal(1, 32)), PC, 2, 0, 0);
    assert_eq!(compressed.alu_result, PC + 2);
}

#[test]
fn jalr_clears_bit_zero() {
    let r = ComputeUnit::compute(&d(asm::jalr(1, 5, 3)), PC, 4, 0x8000_1000, 0);
    assert_eq!(r.branch.unwrap().target, 0x8000_1002);
    assert_eq!(r.alu_result, PC + 4);
}

#[test]
fn store_computes_address_and_value() {
    let r = ComputeUnit::compute(&d(asm::sd(3, 2, -8)), PC, 4, 0x8000_0100, 0xAB);
    assert_eq!(r.alu_result, 0x8000_00F8);
    assert_eq!(r.store_value, 0xAB);
}

// ══════════════════════════════════════════════════════════
// 2. execute
// ══════════════════════════════════════════════════════════

fn cpu(words: &[u32]) -> Cpu {
    let mut config = Config::default();
    config.memory.ram_size = 1 << 16;
    Cpu::new(&config, &Program::from_words(BASE, words)).unwrap()
}

#[test]
fn execute_writes_destination_and_advances() {
    let mut cpu = cpu(&[asm::addi(5, 0, 42)]);
    ComputeUnit::execute(&mut cpu, &d(asm::addi(5, 0, 42)), 4).unwrap();
    assert_eq!(cpu.regs.read(5), 42);
    assert_eq!(cpu.pc, BASE + 4);
}

#[test]
fn execute_load_and_store() {
    let mut cpu = cpu(&[]);
    cpu.regs.write(1, BASE + 0x800);
    cpu.regs.write(2, 0xFFFF_FFFF_8765_4321);
    ComputeUnit::execute(&mut cpu, &d(asm::sw(2, 1, 4)), 4).unwrap();
    assert_eq!(cpu.bus.read_u32(BASE + 0x804), Ok(0x8765_4321));

    ComputeUnit::execute(&mut cpu, &d(asm::lwu(3, 1, 4)), 4).unwrap();
    assert_eq!(cpu.regs.read(3), 0x8765_4321);
    ComputeUnit::execute(&mut cpu, &d(asm::lw(4, 1, 4)), 4).unwrap();
    assert_eq!(cpu.regs.read(4), 0xFFFF_FFFF_8765_4321);
}

#[test]
fn execute_taken_branch_moves_pc() {
    let mut cpu = cpu(&[]);
    ComputeUnit::execute(&mut cpu, &d(asm::beq(0, 0, 12)), 4).unwrap();
    assert_eq!(cpu.pc, BASE + 12);
}

#[test]
fn execute_exit_call_halts() {
    let mut cpu = cpu(&[]);
    cpu.regs.write(10, 3);
    cpu.regs.write(17, 93);
    ComputeUnit::execute(&mut cpu, &d(asm::ecall()), 4).unwrap();
    assert_eq!(cpu.halt, Some(Halt::Exit(3)));
    assert_eq!(cpu.exit_code(), Some(3));
}

#[test]
fn execute_ebreak_halts_without_exit_code() {
    let mut cpu = cpu(&[]);
    ComputeUnit::execute(&mut cpu, &d(asm::ebreak()), 4).unwrap();
    assert_eq!(cpu.halt, Some(Halt::Breakpoint));
    assert_eq!(cpu.exit_code(), None);
}

#[test]
fn execute_out_of_range_load_faults_at_pc() {
    let mut cpu = cpu(&[]);
    let err = ComputeUnit::execute(&mut cpu, &d(asm::ld(1, 0, 8)), 4).unwrap_err();
    match err {
        SimError::MemoryFault { pc, source } => {
            assert_eq!(pc, BASE);
            assert_eq!(source.addr, 8);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(cpu.pc, BASE);
    assert_eq!(cpu.regs.read(1), 0);
}
