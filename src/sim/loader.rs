//! Input file parsing.
//!
//! Programs are plain text, one instruction per line, with `#` comments and
//! blank lines ignored. Data images are `address: value` lines; addresses
//! and values may be decimal or `0x` hexadecimal. A malformed data line is
//! skipped with a warning rather than aborting the load.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::common::SimError;

/// Strips the comment portion of a line, if any.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parses program text into instruction lines.
pub fn parse_program(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| strip_comment(line).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads a program file. An empty program (after comment stripping) is an
/// error: there would be nothing to simulate.
pub fn load_program(path: &Path) -> Result<Vec<String>, SimError> {
    let text = fs::read_to_string(path)?;
    let program = parse_program(&text);
    if program.is_empty() {
        return Err(SimError::EmptyProgram);
    }
    Ok(program)
}

/// Parses one numeric field, decimal or `0x`-prefixed hexadecimal.
fn parse_number(field: &str) -> Option<i64> {
    let field = field.trim();
    if let Some(hex) = field.strip_prefix("0x").or_else(|| field.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()
    } else {
        field.parse().ok()
    }
}

/// Parses a data image into address/value pairs.
pub fn parse_data(text: &str) -> Vec<(u64, i64)> {
    let mut entries = Vec::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let parsed = line
            .split_once(':')
            .and_then(|(addr, value)| Some((parse_number(addr)?, parse_number(value)?)));
        match parsed {
            Some((addr, value)) if addr >= 0 => entries.push((addr as u64, value)),
            _ => warn!(line = lineno + 1, text = line, "skipping malformed data line"),
        }
    }
    entries
}

/// Loads a data image file.
pub fn load_data(path: &Path) -> Result<Vec<(u64, i64)>, SimError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_data(&text))
}
