//! # Direction Predictor Tests
//!
//! Direction learning for the static, bimodal and gshare predictors, plus
//! the BTB and RAS plumbing shared by all of them through the
//! configuration-built wrapper.

use rstest::rstest;
use rvwide_core::config::{BranchPredictor as Kind, PipelineConfig};
use rvwide_core::core::units::bru::bimodal::BimodalPredictor;
use rvwide_core::core::units::bru::btb::Btb;
use rvwide_core::core::units::bru::counter::CounterTable;
use rvwide_core::core::units::bru::gshare::GSharePredictor;
use rvwide_core::core::units::bru::static_bp::StaticPredictor;
use rvwide_core::core::units::bru::{BranchPredictor, BranchPredictorWrapper};

const PC: u64 = 0x8000_0040;
const TARGET: u64 = 0x8000_0000;

fn config(kind: Kind, ras: bool) -> PipelineConfig {
    PipelineConfig {
        branch_predictor: kind,
        return_address_stack: ras,
        ..PipelineConfig::default()
    }
}

// ══════════════════════════════════════════════════════════
// 1. Direction
// ══════════════════════════════════════════════════════════

#[test]
fn static_never_predicts_taken() {
    let mut bp = StaticPredictor::new(Btb::new(16), None);
    for _ in 0..10 {
        bp.update_branch(PC, true, Some(TARGET));
    }
    assert_eq!(bp.predict_branch(PC), (false, None));
}

#[test]
fn bimodal_learns_taken_branch() {
    let mut bp = BimodalPredictor::new(CounterTable::new(6, 2, 1), Btb::new(16), None);
    assert_eq!(bp.predict_branch(PC), (false, None));
    bp.update_branch(PC, true, Some(TARGET));
    assert_eq!(bp.predict_branch(PC), (true, Some(TARGET)));
}

#[test]
fn bimodal_hysteresis_survives_one_exit() {
    let mut bp = BimodalPredictor::new(CounterTable::new(6, 2, 1), Btb::new(16), None);
    for _ in 0..4 {
        bp.update_branch(PC, true, Some(TARGET));
    }
    bp.update_branch(PC, false, None);
    assert!(bp.predict_branch(PC).0);
}

#[test]
fn taken_prediction_without_btb_entry_has_no_target() {
    let mut bp = BimodalPredictor::new(CounterTable::new(6, 2, 1), Btb::new(16), None);
    bp.update_branch(PC, true, None);
    assert_eq!(bp.predict_branch(PC), (true, None));
}

#[test]
fn gshare_shifts_history() {
    let mut bp = GSharePredictor::new(CounterTable::new(6, 2, 1), 4, Btb::new(16), None);
    bp.update_branch(PC, true, Some(TARGET));
    bp.update_branch(PC, false, None);
    bp.update_branch(PC, true, Some(TARGET));
    assert_eq!(bp.history(), 0b101);
    for _ in 0..4 {
        bp.update_branch(PC, true, Some(TARGET));
    }
    assert_eq!(bp.history(), 0b1111);
}

#[test]
fn gshare_learns_alternating_pattern() {
    // Bimodal cannot learn T,N,T,N; two bits of history can.
    let mut bp = GSharePredictor::new(CounterTable::new(8, 2, 1), 2, Btb::new(16), None);
    for i in 0..64 {
        bp.update_branch(PC, i % 2 == 0, Some(TARGET));
    }
    let mut correct = 0;
    for i in 0..16 {
        let taken = i % 2 == 0;
        if bp.predict_branch(PC).0 == taken {
            correct += 1;
        }
        bp.update_branch(PC, taken, Some(TARGET));
    }
    assert_eq!(correct, 16);
}

#[test]
fn gshare_trains_the_entry_selected_at_fetch() {
    let mut bp = GSharePredictor::new(CounterTable::new(6, 2, 1), 4, Btb::new(16), None);
    // fetched while an older branch at PC + 8 was still in flight
    let fetched_under = bp.history();
    bp.update_branch(PC + 8, true, None);
    assert_eq!(bp.history(), 0b1);

    bp.train_branch(PC, fetched_under, true, Some(TARGET));
    let at_fetch = bp.table().index(PC >> 1);
    let at_resolve = bp.table().index((PC >> 1) ^ 0b1);
    assert_eq!(bp.table().value(at_fetch), 2);
    assert_eq!(bp.table().value(at_resolve), 1);
    assert_eq!(bp.history(), 0b11);
}

#[test]
fn history_free_predictors_report_zero() {
    let mut bp = BimodalPredictor::new(CounterTable::new(6, 2, 1), Btb::new(16), None);
    bp.train_branch(PC, 0xFF, true, Some(TARGET));
    assert_eq!(bp.history(), 0);
    assert_eq!(bp.predict_branch(PC), (true, Some(TARGET)));
}

// ══════════════════════════════════════════════════════════
// 2. BTB and RAS through the wrapper
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Kind::Static)]
#[case(Kind::Bimodal)]
#[case(Kind::GShare)]
fn wrapper_builds_configured_variant(#[case] kind: Kind) {
    let bp = BranchPredictorWrapper::new(&config(kind, false));
    let built = match bp {
        BranchPredictorWrapper::Static(_) => kind == Kind::Static,
        BranchPredictorWrapper::Bimodal(_) => kind == Kind::Bimodal,
        BranchPredictorWrapper::GShare(_) => kind == Kind::GShare,
    };
    assert!(built);
}

#[rstest]
#[case(Kind::Static)]
#[case(Kind::Bimodal)]
#[case(Kind::GShare)]
fn jumps_use_btb(#[case] kind: Kind) {
    let mut bp = BranchPredictorWrapper::new(&config(kind, false));
    assert_eq!(bp.predict_btb(PC), None);
    bp.update_btb(PC, TARGET);
    assert_eq!(bp.predict_btb(PC), Some(TARGET));
}

#[rstest]
#[case(Kind::Static)]
#[case(Kind::Bimodal)]
#[case(Kind::GShare)]
fn calls_push_and_returns_pop(#[case] kind: Kind) {
    let mut bp = BranchPredictorWrapper::new(&config(kind, true));
    bp.on_call(PC, PC + 4, TARGET);
    bp.on_call(TARGET, TARGET + 4, 0x8000_0200);
    assert_eq!(bp.predict_return(), Some(TARGET + 4));
    bp.on_return();
    assert_eq!(bp.predict_return(), Some(PC + 4));
    bp.on_return();
    assert_eq!(bp.predict_return(), None);
    assert_eq!(bp.predict_btb(PC), Some(TARGET));
}

#[test]
fn without_ras_returns_are_unpredicted() {
    let mut bp = BranchPredictorWrapper::new(&config(Kind::Bimodal, false));
    bp.on_call(PC, PC + 4, TARGET);
    assert_eq!(bp.predict_return(), None);
}
