//! Simulator error definitions.
//!
//! The steady-state cycle loop is infallible: decode failures flow through
//! the pipeline as inert slots and memory never faults. `SimError` covers
//! the boundary instead: file loading, configuration parsing, and the
//! runaway-execution guard of the driving loop.

use thiserror::Error;

/// Errors surfaced by the simulation harness.
#[derive(Debug, Error)]
pub enum SimError {
    /// Reading a program, data, or configuration file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file was not valid TOML for [`crate::config::SimConfig`].
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Serializing the statistics report failed.
    #[error("report serialization error: {0}")]
    Report(#[from] serde_json::Error),

    /// The program file contained no instructions after comment stripping.
    #[error("program is empty")]
    EmptyProgram,

    /// The driving loop hit its cycle cap before the program finished.
    ///
    /// Malformed programs can loop forever; the cap turns that into a
    /// reportable failure instead of a hang.
    #[error("simulation exceeded the cycle limit of {0}")]
    CycleLimit(u64),
}
