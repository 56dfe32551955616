//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline constants (RAM layout, width, predictor tables, budget).
//! 2. **Structures:** Hierarchical config for general, memory and pipeline settings.
//! 3. **Enums:** The branch predictor variant.
//! 4. **Validation:** Eager rejection of out-of-range parameters.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built from
//! `Config::default()` and adjusted field by field.

use serde::{Deserialize, Serialize};

use crate::common::constants::{MAX_PIPELINE_WIDTH, MAX_RAM_SIZE};
use crate::common::error::ConfigurationError;

/// Default configuration constants.
///
/// These values define the baseline machine when a field is not
/// explicitly present in the configuration document.
mod defaults {
    /// Base address of RAM.
    pub const RAM_BASE: u64 = 0x8000_0000;

    /// Size of RAM (16 MiB).
    pub const RAM_SIZE: usize = 16 * 1024 * 1024;

    /// Default pipeline width (single issue).
    pub const PIPELINE_WIDTH: usize = 1;

    /// Default fetch buffer ratio (fetch buffer holds exactly one bundle).
    pub const FETCH_BUFFER_RATIO: f64 = 1.0;

    /// Default saturating counter width in bits.
    pub const COUNTER_BITS: u8 = 2;

    /// Default initial counter value (weakly not-taken for 2-bit counters).
    pub const INITIAL_COUNTER: u8 = 1;

    /// Default pattern table index width (1024 entries).
    pub const TABLE_BITS: usize = 10;

    /// Default global history length for gshare.
    pub const HISTORY_BITS: usize = 10;

    /// Default Branch Target Buffer size (256 entries).
    pub const BTB_SIZE: usize = 256;

    /// Default Return Address Stack depth (8 entries).
    pub const RAS_SIZE: usize = 8;

    /// Default max-cycle budget.
    pub const MAX_CYCLES: u64 = 10_000_000;
}

/// Branch direction predictor variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Always predicts not-taken.
    #[default]
    Static,
    /// N-bit saturating counters indexed by PC.
    Bimodal,
    /// N-bit saturating counters indexed by PC XOR global history.
    GShare,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rvwide_core::config::{BranchPredictor, Config};
///
/// let json = r#"{
///     "general": { "max_cycles": 5000 },
///     "pipeline": {
///         "width": 4,
///         "branch_predictor": "GShare",
///         "early_branch_resolution": true
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.pipeline.width, 4);
/// assert_eq!(config.pipeline.branch_predictor, BranchPredictor::GShare);
/// assert_eq!(config.general.max_cycles, 5000);
/// assert_eq!(config.pipeline.counter_bits, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// RAM layout
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Pipeline, predictor and feature toggles
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Parse`] for malformed JSON and any
    /// validation error from [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every parameter against its legal range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.general.validate()?;
        self.memory.validate()?;
        self.pipeline.validate()
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Initial PC. Defaults to the program entry point.
    #[serde(default)]
    pub start_pc: Option<u64>,

    /// Initial stack pointer. Defaults to the top of RAM, 16-byte aligned.
    #[serde(default)]
    pub initial_sp: Option<u64>,

    /// Cycle budget for the pipelined model; also the step budget of the
    /// reference model.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    const fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_cycles == 0 {
            return Err(ConfigurationError::CycleBudget);
        }
        Ok(())
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_pc: None,
            initial_sp: None,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// RAM layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MemoryConfig {
    /// Main RAM base address
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u64,

    /// Main RAM size in bytes
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,
}

impl MemoryConfig {
    const fn default_ram_base() -> u64 {
        defaults::RAM_BASE
    }

    const fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }

    /// Returns one past the last RAM address.
    pub const fn ram_end(&self) -> u64 {
        self.ram_base.wrapping_add(self.ram_size as u64)
    }

    const fn validate(&self) -> Result<(), ConfigurationError> {
        if self.ram_size == 0 || self.ram_size > MAX_RAM_SIZE {
            return Err(ConfigurationError::MemorySize(self.ram_size));
        }
        if self.ram_base.checked_add(self.ram_size as u64).is_none() {
            return Err(ConfigurationError::MemoryRange {
                base: self.ram_base,
                size: self.ram_size,
            });
        }
        Ok(())
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
        }
    }
}

/// Pipeline, branch predictor and feature configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Superscalar width (micro-ops per stage per cycle), 1..=32
    #[serde(default = "PipelineConfig::default_width")]
    pub width: usize,

    /// Fetch buffer capacity as a multiple of `width`, 1.0..=4.0
    #[serde(default = "PipelineConfig::default_fetch_buffer_ratio")]
    pub fetch_buffer_ratio: f64,

    /// Branch predictor type
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// Saturating counter width in bits
    #[serde(default = "PipelineConfig::default_counter_bits")]
    pub counter_bits: u8,

    /// Initial value of every saturating counter
    #[serde(default = "PipelineConfig::default_initial_counter")]
    pub initial_counter: u8,

    /// log2 of the pattern table size
    #[serde(default = "PipelineConfig::default_table_bits")]
    pub table_bits: usize,

    /// Global history length for gshare
    #[serde(default = "PipelineConfig::default_history_bits")]
    pub history_bits: usize,

    /// Branch Target Buffer size
    #[serde(default = "PipelineConfig::default_btb_size")]
    pub btb_size: usize,

    /// Return Address Stack depth
    #[serde(default = "PipelineConfig::default_ras_size")]
    pub ras_size: usize,

    /// Repair mispredictions in Decode (1-cycle penalty) instead of Execute
    #[serde(default)]
    pub early_branch_resolution: bool,

    /// Follow predictions at fetch; when off, fetch is strictly sequential
    #[serde(default = "PipelineConfig::default_dynamic_branch_fetching")]
    pub dynamic_branch_fetching: bool,

    /// Same-cycle forwarding between adjacent execute lanes
    #[serde(default)]
    pub cascaded_execution: bool,

    /// Fuse recognised adjacent instruction pairs
    #[serde(default)]
    pub macro_op_fusion: bool,

    /// Predict returns with a Return Address Stack
    #[serde(default)]
    pub return_address_stack: bool,

    /// Cross-check every run against the sequential reference model
    #[serde(default)]
    pub tandem_verification: bool,
}

impl PipelineConfig {
    const fn default_width() -> usize {
        defaults::PIPELINE_WIDTH
    }

    const fn default_fetch_buffer_ratio() -> f64 {
        defaults::FETCH_BUFFER_RATIO
    }

    const fn default_counter_bits() -> u8 {
        defaults::COUNTER_BITS
    }

    const fn default_initial_counter() -> u8 {
        defaults::INITIAL_COUNTER
    }

    const fn default_table_bits() -> usize {
        defaults::TABLE_BITS
    }

    const fn default_history_bits() -> usize {
        defaults::HISTORY_BITS
    }

    const fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }

    const fn default_ras_size() -> usize {
        defaults::RAS_SIZE
    }

    const fn default_dynamic_branch_fetching() -> bool {
        true
    }

    /// Number of slots in the Fetch/Decode buffer.
    ///
    /// `ceil(width * fetch_buffer_ratio)`, never less than `width`.
    pub fn fetch_buffer_slots(&self) -> usize {
        let scaled = (self.width as f64 * self.fetch_buffer_ratio).ceil() as usize;
        scaled.max(self.width)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 || self.width > MAX_PIPELINE_WIDTH {
            return Err(ConfigurationError::Width(self.width));
        }
        if !self.fetch_buffer_ratio.is_finite() || !(1.0..=4.0).contains(&self.fetch_buffer_ratio)
        {
            return Err(ConfigurationError::FetchBufferRatio(self.fetch_buffer_ratio));
        }
        if self.counter_bits == 0 || self.counter_bits > 8 {
            return Err(ConfigurationError::CounterBits(self.counter_bits));
        }
        if u16::from(self.initial_counter) >= 1u16 << self.counter_bits {
            return Err(ConfigurationError::InitialCounter {
                value: self.initial_counter,
                bits: self.counter_bits,
            });
        }
        if self.table_bits == 0 || self.table_bits > 20 {
            return Err(ConfigurationError::TableBits(self.table_bits));
        }
        if self.history_bits == 0 || self.history_bits > 63 {
            return Err(ConfigurationError::HistoryBits(self.history_bits));
        }
        if !self.btb_size.is_power_of_two() {
            return Err(ConfigurationError::NotPowerOfTwo {
                name: "btb_size",
                value: self.btb_size,
            });
        }
        if self.ras_size == 0 {
            return Err(ConfigurationError::RasSize);
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    /// Single issue, static prediction with dynamic fetching, every
    /// optional feature off.
    fn default() -> Self {
        Self {
            width: defaults::PIPELINE_WIDTH,
            fetch_buffer_ratio: defaults::FETCH_BUFFER_RATIO,
            branch_predictor: BranchPredictor::default(),
            counter_bits: defaults::COUNTER_BITS,
            initial_counter: defaults::INITIAL_COUNTER,
            table_bits: defaults::TABLE_BITS,
            history_bits: defaults::HISTORY_BITS,
            btb_size: defaults::BTB_SIZE,
            ras_size: defaults::RAS_SIZE,
            early_branch_resolution: false,
            dynamic_branch_fetching: true,
            cascaded_execution: false,
            macro_op_fusion: false,
            return_address_stack: false,
            tandem_verification: false,
        }
    }
}
