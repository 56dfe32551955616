//! # Tandem Comparison Tests
//!
//! `TandemReport::compare` reports the first divergence in the order
//! registers, output, exit status.

use pretty_assertions::assert_eq;
use rvwide_core::core::cpu::Halt;
use rvwide_core::sim::simulator::{RunOutcome, RunStatus};
use rvwide_core::sim::tandem::{TandemMismatch, TandemReport, TandemVerifier};

use crate::common::{TestContext, asm, program};

fn outcome() -> RunOutcome {
    let mut registers = [0; 32];
    registers[10] = 5;
    RunOutcome {
        status: RunStatus::Halted(Halt::Exit(5)),
        cycles: 10,
        instructions_retired: 4,
        registers,
        output: b"abc".to_vec(),
    }
}

#[test]
fn identical_outcomes_pass() {
    let mut pipeline = outcome();
    pipeline.cycles = 42;
    let report = TandemReport::compare(pipeline, outcome());
    assert!(report.passed());
    assert_eq!(report.mismatch, None);
}

#[test]
fn first_differing_register_is_reported() {
    let mut pipeline = outcome();
    pipeline.registers[3] = 1;
    pipeline.registers[7] = 2;
    pipeline.output = b"xyz".to_vec();
    let report = TandemReport::compare(pipeline, outcome());
    assert_eq!(
        report.mismatch,
        Some(TandemMismatch::Register {
            index: 3,
            actual: 1,
            expected: 0
        })
    );
}

#[test]
fn output_difference_reports_offset() {
    let mut pipeline = outcome();
    pipeline.output = b"abXY".to_vec();
    let report = TandemReport::compare(pipeline, outcome());
    assert_eq!(
        report.mismatch,
        Some(TandemMismatch::Output {
            offset: 2,
            actual: b"XY".to_vec(),
            expected: b"c".to_vec()
        })
    );
}

#[test]
fn output_prefix_reports_length_of_shorter() {
    let mut pipeline = outcome();
    pipeline.output = b"ab".to_vec();
    let report = TandemReport::compare(pipeline, outcome());
    assert_eq!(
        report.mismatch,
        Some(TandemMismatch::Output {
            offset: 2,
            actual: Vec::new(),
            expected: b"c".to_vec()
        })
    );
}

#[test]
fn exit_status_is_compared_last() {
    let mut pipeline = outcome();
    pipeline.status = RunStatus::BudgetExhausted;
    let report = TandemReport::compare(pipeline, outcome());
    assert_eq!(
        report.mismatch,
        Some(TandemMismatch::ExitStatus {
            actual: RunStatus::BudgetExhausted,
            expected: RunStatus::Halted(Halt::Exit(5))
        })
    );
}

#[test]
fn verifier_runs_both_models() {
    let ctx = TestContext::new().width(3);
    let (report, metrics) = TandemVerifier::new(&ctx.config, &program(&[asm::addi(10, 0, 4)]))
        .unwrap()
        .run()
        .unwrap();
    assert!(report.passed());
    assert_eq!(report.reference.instructions_retired, 3);
    assert_eq!(metrics.instructions_retired, 3);
    assert!(report.pipeline.cycles > report.reference.cycles);
}
