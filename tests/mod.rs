//! Test module organization.
//!
//! This module organizes all integration tests for the pipeline simulator.


/// Memory, register file and loader tests.
mod common_tests;

/// Textual instruction decoder tests.
mod decode_tests;


/// End-to-end program runs through the processor.
mod integration_tests;
