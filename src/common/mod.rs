//! Shared types and error handling.

pub mod error;

pub use error::SimError;
