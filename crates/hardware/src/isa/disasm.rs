//! Instruction disassembler.
//!
//! Produces one-line assembly text for pipeline snapshots and trace output.
//! Registers are printed with their ABI names.

use crate::isa::abi::reg_name;
use crate::isa::decode::{Decoded, decode};
use crate::isa::op::Format;

/// Disassembles a decoded instruction.
pub fn disassemble(d: &Decoded) -> String {
    let m = d.mnemonic();
    let rd = reg_name(d.rd);
    let rs1 = reg_name(d.rs1);
    let rs2 = reg_name(d.rs2);
    let ctrl = d.ctrl();

    match d.op.format() {
        Format::R => format!("{m} {rd}, {rs1}, {rs2}"),
        Format::I if ctrl.mem_read || ctrl.jump => format!("{m} {rd}, {}({rs1})", d.imm),
        Format::I => format!("{m} {rd}, {rs1}, {}", d.imm),
        Format::S => format!("{m} {rs2}, {}({rs1})", d.imm),
        Format::B => format!("{m} {rs1}, {rs2}, {}", d.imm),
        Format::U => format!("{m} {rd}, {:#x}", (d.imm as u64 >> 12) & 0xF_FFFF),
        Format::J => format!("{m} {rd}, {}", d.imm),
        Format::Sys => m.to_owned(),
    }
}

/// Disassembles a raw 32-bit word, marking undecodable words.
pub fn disassemble_word(raw: u32) -> String {
    decode(raw).map_or_else(|_| format!("illegal {raw:#010x}"), |d| disassemble(&d))
}
