//! Simulator configuration.
//!
//! Loaded from a TOML file; every field has a default so a missing file
//! section (or no file at all) yields a fully usable configuration. CLI
//! flags override whatever the file said.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::SimError;

fn default_true() -> bool {
    true
}

fn default_max_cycles() -> u64 {
    1_000_000
}

/// Pipeline mode switches.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// False runs the program one full instruction per cycle instead.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// False stalls every RAW dependency until writeback.
    #[serde(default = "default_true")]
    pub forwarding: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            forwarding: true,
        }
    }
}

/// Which optional state dumps the simulator keeps and reports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceConfig {
    /// Dump the register file at the end of the run.
    #[serde(default)]
    pub registers: bool,
    /// Expose pipeline latch contents.
    #[serde(default)]
    pub pipeline: bool,
    /// Expose predictor PHT and BTB contents.
    #[serde(default)]
    pub predictor: bool,
    /// Restrict the instruction trace to one sequence number.
    #[serde(default)]
    pub instruction: Option<u64>,
}

/// Runaway-simulation guards.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Abort after this many cycles. Programs that never drain (an
    /// unfortunate `j 0`, say) would otherwise spin forever.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_cycles: default_max_cycles(),
        }
    }
}

/// Top-level simulator configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl SimConfig {
    /// Loads a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
