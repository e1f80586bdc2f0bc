//! Processor core implementation.
//!
//! The [`processor::Processor`] orchestrates the [`pipeline::Pipeline`] and
//! the [`branch_predictor::BranchPredictor`] across cycles and aggregates
//! statistics and traces; everything here is owned by one simulation
//! instance and advanced one explicit clock cycle at a time.

pub mod branch_predictor;
pub mod memory;
pub mod pipeline;
pub mod processor;
pub mod register_file;

pub use branch_predictor::BranchPredictor;
pub use memory::Memory;
pub use pipeline::Pipeline;
pub use processor::Processor;
pub use register_file::RegisterFile;
