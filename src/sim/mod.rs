//! Program and data file loading.

pub mod loader;

pub use loader::{load_data, load_program, parse_data, parse_program};
