//! # Program Tests
//!
//! A recursive factorial exercises calls, returns, the stack, loads feeding
//! multiplies and a data-dependent branch across every configuration axis.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvwide_core::Program;
use rvwide_core::config::BranchPredictor;
use rvwide_core::core::cpu::Halt;
use rvwide_core::sim::simulator::RunStatus;

use crate::common::{ProgramBuilder, TestContext, asm, program};

const RA: u32 = 1;
const SP: u32 = 2;
const T0: u32 = 5;
const T1: u32 = 6;
const A0: u32 = 10;
const A7: u32 = 17;

/// `exit(fact(n))` with a textbook recursive `fact`.
fn factorial(n: i32) -> Program {
    ProgramBuilder::new()
        .insts(&[
            asm::addi(A0, 0, n),
            asm::jal(RA, 12),
            asm::addi(A7, 0, 93),
            asm::ecall(),
            // fact:
            asm::addi(SP, SP, -16),
            asm::sd(RA, SP, 8),
            asm::sd(A0, SP, 0),
            asm::addi(T0, 0, 1),
            asm::bge(T0, A0, 24),
            asm::addi(A0, A0, -1),
            asm::jal(RA, -24),
            asm::ld(T1, SP, 0),
            asm::mul(A0, A0, T1),
            asm::jal(0, 8),
            // base:
            asm::addi(A0, 0, 1),
            // out:
            asm::ld(RA, SP, 8),
            asm::addi(SP, SP, 16),
            asm::ret(),
        ])
        .build()
}

#[rstest]
fn factorial_of_five(
    #[values(1, 2, 4, 8)] width: usize,
    #[values(false, true)] ras: bool,
    #[values(BranchPredictor::Static, BranchPredictor::GShare)] kind: BranchPredictor,
) {
    let ctx = TestContext::new().width(width).ras(ras).predictor(kind);
    let sim = ctx.run(&factorial(5));
    assert_eq!(sim.outcome().status, RunStatus::Halted(Halt::Exit(120)));

    let report = ctx.tandem(&factorial(5));
    assert!(report.passed(), "{:?}", report.mismatch);
    assert_eq!(report.reference.exit_code(), Some(120));
}

#[test]
fn every_feature_at_once() {
    let ctx = TestContext::new()
        .width(4)
        .fetch_ratio(2.0)
        .predictor(BranchPredictor::Bimodal)
        .ras(true)
        .cascade(true)
        .fusion(true)
        .early_branch_resolution(true);
    let report = ctx.tandem(&factorial(10));
    assert!(report.passed(), "{:?}", report.mismatch);
    assert_eq!(report.pipeline.exit_code(), Some(3_628_800));
}

#[test]
fn return_address_stack_predicts_returns() {
    let without = TestContext::new().predictor(BranchPredictor::Bimodal).run(&factorial(6));
    let with = TestContext::new()
        .predictor(BranchPredictor::Bimodal)
        .ras(true)
        .run(&factorial(6));
    assert!(with.stats().branch_mispredictions < without.stats().branch_mispredictions);
    assert_eq!(with.outcome().registers, without.outcome().registers);
}

#[test]
fn wider_is_not_slower_on_independent_work() {
    let words: Vec<u32> = (1..=24).map(|r| asm::addi(r % 8 + 1, 0, r as i32)).collect();
    let image = program(&words);
    let narrow = TestContext::new().width(1).run(&image);
    let wide = TestContext::new().width(4).run(&image);
    assert!(wide.stats().cycles < narrow.stats().cycles);
    assert!(wide.stats().ipc() > narrow.stats().ipc());
    assert_eq!(wide.outcome().registers, narrow.outcome().registers);
}
