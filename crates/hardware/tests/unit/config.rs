//! # Configuration Tests
//!
//! Defaults, JSON deserialization, fetch buffer sizing and eager validation
//! of out-of-range parameters.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvwide_core::common::constants::MAX_RAM_SIZE;
use rvwide_core::common::error::ConfigurationError;
use rvwide_core::config::{BranchPredictor, Config, GeneralConfig, MemoryConfig, PipelineConfig};

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn general_defaults() {
    let general = GeneralConfig::default();
    assert_eq!(general.start_pc, None);
    assert_eq!(general.initial_sp, None);
    assert_eq!(general.max_cycles, 10_000_000);
}

#[test]
fn memory_defaults() {
    let memory = MemoryConfig::default();
    assert_eq!(memory.ram_base, 0x8000_0000);
    assert_eq!(memory.ram_size, 16 * 1024 * 1024);
    assert_eq!(memory.ram_end(), 0x8100_0000);
}

#[test]
fn pipeline_defaults() {
    let p = PipelineConfig::default();
    assert_eq!(p.width, 1);
    assert!((p.fetch_buffer_ratio - 1.0).abs() < f64::EPSILON);
    assert_eq!(p.branch_predictor, BranchPredictor::Static);
    assert_eq!(p.counter_bits, 2);
    assert_eq!(p.initial_counter, 1);
    assert_eq!(p.table_bits, 10);
    assert_eq!(p.history_bits, 10);
    assert_eq!(p.btb_size, 256);
    assert_eq!(p.ras_size, 8);
    assert!(p.dynamic_branch_fetching);
    assert!(!p.early_branch_resolution);
    assert!(!p.cascaded_execution);
    assert!(!p.macro_op_fusion);
    assert!(!p.return_address_stack);
    assert!(!p.tandem_verification);
}

#[test]
fn default_config_is_valid() {
    assert!(Config::default().validate().is_ok());
}

// ══════════════════════════════════════════════════════════
// 2. JSON
// ══════════════════════════════════════════════════════════

#[test]
fn empty_document_yields_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn partial_document_keeps_other_defaults() {
    let json = r#"{
        "general": { "start_pc": 2147483712, "max_cycles": 500 },
        "memory": { "ram_size": 65536 },
        "pipeline": {
            "width": 8,
            "fetch_buffer_ratio": 2.5,
            "branch_predictor": "Bimodal",
            "macro_op_fusion": true
        }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.general.start_pc, Some(0x8000_0040));
    assert_eq!(config.general.max_cycles, 500);
    assert_eq!(config.memory.ram_size, 65536);
    assert_eq!(config.memory.ram_base, 0x8000_0000);
    assert_eq!(config.pipeline.width, 8);
    assert_eq!(config.pipeline.branch_predictor, BranchPredictor::Bimodal);
    assert!(config.pipeline.macro_op_fusion);
    assert!(config.pipeline.dynamic_branch_fetching);
    assert_eq!(config.pipeline.btb_size, 256);
}

#[test]
fn json_round_trips_through_serde() {
    let mut config = Config::default();
    config.pipeline.width = 4;
    config.pipeline.branch_predictor = BranchPredictor::GShare;
    config.pipeline.early_branch_resolution = true;
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), config);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = Config::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigurationError::Parse(_)));
}

#[test]
fn unknown_predictor_is_a_parse_error() {
    let err = Config::from_json(r#"{ "pipeline": { "branch_predictor": "Tage" } }"#).unwrap_err();
    assert!(matches!(err, ConfigurationError::Parse(_)));
}

#[test]
fn from_json_validates() {
    let err = Config::from_json(r#"{ "pipeline": { "width": 33 } }"#).unwrap_err();
    assert_eq!(err, ConfigurationError::Width(33));
}

// ══════════════════════════════════════════════════════════
// 3. Fetch buffer sizing
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(1, 1.0, 1)]
#[case(4, 1.0, 4)]
#[case(4, 1.5, 6)]
#[case(3, 1.5, 5)]
#[case(2, 4.0, 8)]
#[case(32, 4.0, 128)]
fn fetch_buffer_slots_round_up(#[case] width: usize, #[case] ratio: f64, #[case] slots: usize) {
    let p = PipelineConfig {
        width,
        fetch_buffer_ratio: ratio,
        ..PipelineConfig::default()
    };
    assert_eq!(p.fetch_buffer_slots(), slots);
}

// ══════════════════════════════════════════════════════════
// 4. Validation
// ══════════════════════════════════════════════════════════

fn with_pipeline(f: impl FnOnce(&mut PipelineConfig)) -> Result<(), ConfigurationError> {
    let mut config = Config::default();
    f(&mut config.pipeline);
    config.validate()
}

#[rstest]
#[case(0)]
#[case(33)]
fn width_out_of_range(#[case] width: usize) {
    assert_eq!(
        with_pipeline(|p| p.width = width),
        Err(ConfigurationError::Width(width))
    );
}

#[rstest]
#[case(1)]
#[case(32)]
fn width_bounds_accepted(#[case] width: usize) {
    assert_eq!(with_pipeline(|p| p.width = width), Ok(()));
}

#[rstest]
#[case(0.5)]
#[case(4.5)]
fn fetch_ratio_out_of_range(#[case] ratio: f64) {
    assert!(matches!(
        with_pipeline(|p| p.fetch_buffer_ratio = ratio),
        Err(ConfigurationError::FetchBufferRatio(_))
    ));
}

#[test]
fn fetch_ratio_nan_rejected() {
    assert!(matches!(
        with_pipeline(|p| p.fetch_buffer_ratio = f64::NAN),
        Err(ConfigurationError::FetchBufferRatio(_))
    ));
}

#[rstest]
#[case(0)]
#[case(9)]
fn counter_bits_out_of_range(#[case] bits: u8) {
    assert_eq!(
        with_pipeline(|p| p.counter_bits = bits),
        Err(ConfigurationError::CounterBits(bits))
    );
}

#[test]
fn initial_counter_must_fit() {
    assert_eq!(
        with_pipeline(|p| {
            p.counter_bits = 2;
            p.initial_counter = 4;
        }),
        Err(ConfigurationError::InitialCounter { value: 4, bits: 2 })
    );
}

#[test]
fn eight_bit_counters_accept_255() {
    assert_eq!(
        with_pipeline(|p| {
            p.counter_bits = 8;
            p.initial_counter = 255;
        }),
        Ok(())
    );
}

#[rstest]
#[case(0)]
#[case(21)]
fn table_bits_out_of_range(#[case] bits: usize) {
    assert_eq!(
        with_pipeline(|p| p.table_bits = bits),
        Err(ConfigurationError::TableBits(bits))
    );
}

#[rstest]
#[case(0)]
#[case(64)]
fn history_bits_out_of_range(#[case] bits: usize) {
    assert_eq!(
        with_pipeline(|p| p.history_bits = bits),
        Err(ConfigurationError::HistoryBits(bits))
    );
}

#[rstest]
#[case(0)]
#[case(100)]
fn btb_size_must_be_power_of_two(#[case] size: usize) {
    assert_eq!(
        with_pipeline(|p| p.btb_size = size),
        Err(ConfigurationError::NotPowerOfTwo {
            name: "btb_size",
            value: size
        })
    );
}

#[test]
fn ras_size_zero_rejected() {
    assert_eq!(
        with_pipeline(|p| p.ras_size = 0),
        Err(ConfigurationError::RasSize)
    );
}

#[test]
fn zero_ram_rejected() {
    let mut config = Config::default();
    config.memory.ram_size = 0;
    assert_eq!(config.validate(), Err(ConfigurationError::MemorySize(0)));
}

#[test]
fn oversized_ram_rejected_before_allocation() {
    let mut config = Config::default();
    config.memory.ram_base = 0;
    config.memory.ram_size = 1 << 62;
    assert_eq!(
        config.validate(),
        Err(ConfigurationError::MemorySize(1 << 62))
    );
}

#[test]
fn largest_ram_accepted() {
    let mut config = Config::default();
    config.memory.ram_base = 0;
    config.memory.ram_size = MAX_RAM_SIZE;
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn wrapping_ram_rejected() {
    let mut config = Config::default();
    config.memory.ram_base = u64::MAX - 16;
    config.memory.ram_size = 64;
    assert!(matches!(
        config.validate(),
        Err(ConfigurationError::MemoryRange { .. })
    ));
}

#[test]
fn zero_cycle_budget_rejected() {
    let mut config = Config::default();
    config.general.max_cycles = 0;
    assert_eq!(config.validate(), Err(ConfigurationError::CycleBudget));
}
