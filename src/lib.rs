//! Cycle-accurate 5-stage RISC-V pipeline simulator.
//!
//! This crate implements a teaching simulator for a 5-stage in-order scalar
//! pipeline (Fetch, Decode, Execute, Memory, Writeback) running a small
//! textual RISC-style instruction set. It models the hazard-detection and
//! forwarding unit and a dynamic 1-bit branch predictor with a branch target
//! buffer, so that stalls, forwarding paths, and branch mispredictions can be
//! observed cycle by cycle.
//!
//! # Architecture
//!
//! * **Core**: 5-stage in-order pipeline with hazard detection, forwarding,
//!   and speculative fetch; an optional single-cycle (non-pipelined) mode.
//! * **ISA**: a small textual subset of RISC-V (ALU ops, `lw`/`sw`, branches
//!   and jumps); instructions are decoded from assembly text, not from
//!   machine words.
//! * **Predictor**: per-address 1-bit last-outcome history plus a BTB.
//!
//! # Modules
//!
//! * `common`: Shared error handling.
//! * `config`: Configuration loading and parsing.
//! * `core`: Processor, pipeline, memories, register file, branch predictor.
//! * `isa`: Instruction model and textual decoder.
//! * `sim`: Program and data file loaders.
//! * `stats`: Simulation statistics collection.

/// Shared error types used throughout the simulator.
pub mod common;

/// Configuration system for pipeline, trace, and limit settings.
pub mod config;

/// Processor core: pipeline engine, memories, register file, predictor.
pub mod core;

/// Instruction set model and textual decoder.
pub mod isa;

/// Program and data file loaders.
pub mod sim;

/// Simulation statistics collection and reporting.
pub mod stats;
