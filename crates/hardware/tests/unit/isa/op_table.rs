//! # Operation Table Tests

use rvwide_core::isa::op::{Format, OP_TABLE, Op, OpClass};

#[test]
fn rows_are_indexed_by_variant() {
    assert_eq!(OP_TABLE.len(), Op::COUNT);
    for (idx, info) in OP_TABLE.iter().enumerate() {
        assert_eq!(info.op as usize, idx, "row {idx} describes {:?}", info.op);
    }
}

#[test]
fn mnemonics_are_unique() {
    let mut names: Vec<_> = OP_TABLE.iter().map(|i| i.mnemonic).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Op::COUNT);
}

#[test]
fn classes() {
    assert_eq!(Op::Lui.class(), OpClass::Alu);
    assert_eq!(Op::Addw.class(), OpClass::Alu);
    assert_eq!(Op::Mul.class(), OpClass::MulDiv);
    assert_eq!(Op::Remuw.class(), OpClass::MulDiv);
    assert_eq!(Op::Lbu.class(), OpClass::Load);
    assert_eq!(Op::Sd.class(), OpClass::Store);
    assert_eq!(Op::Bgeu.class(), OpClass::Branch);
    assert_eq!(Op::Jal.class(), OpClass::Jump);
    assert_eq!(Op::Jalr.class(), OpClass::Jump);
    assert_eq!(Op::Ecall.class(), OpClass::System);
    assert_eq!(Op::Fence.class(), OpClass::System);
}

#[test]
fn formats() {
    assert_eq!(Op::Add.format(), Format::R);
    assert_eq!(Op::Jalr.format(), Format::I);
    assert_eq!(Op::Sw.format(), Format::S);
    assert_eq!(Op::Beq.format(), Format::B);
    assert_eq!(Op::Auipc.format(), Format::U);
    assert_eq!(Op::Jal.format(), Format::J);
    assert_eq!(Op::Ebreak.format(), Format::Sys);
}

#[test]
fn control_signals() {
    let jal = Op::Jal.info().ctrl;
    assert!(jal.jump && jal.reg_write && jal.is_control());

    let beq = Op::Beq.info().ctrl;
    assert!(beq.branch && !beq.reg_write);
    assert!(beq.reads_rs1() && beq.reads_rs2());

    let sw = Op::Sw.info().ctrl;
    assert!(sw.mem_write && sw.reads_rs2());

    let lw = Op::Lw.info().ctrl;
    assert!(lw.mem_read && lw.signed_load && lw.reg_write);
    assert!(!Op::Lwu.info().ctrl.signed_load);

    assert!(Op::Addw.info().ctrl.is_rv32);
    assert!(!Op::Add.info().ctrl.is_rv32);
    assert!(!Op::Lui.info().ctrl.reads_rs1());
}

#[test]
fn display_is_mnemonic() {
    assert_eq!(Op::Sltiu.to_string(), "sltiu");
    assert_eq!(Op::Divuw.to_string(), "divuw");
}
