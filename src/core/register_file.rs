//! General-purpose register file.
//!
//! 32 integer registers, x0-x31. Writes to x0 are NOT suppressed here: the
//! hazard unit treats x0 as hazard-free, but the register file itself is a
//! plain array and software is expected to follow the convention. Keeping
//! the asymmetry matches the machine this simulator models for teaching.

/// The 32-entry integer register file.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    regs: [i64; 32],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a register file with all registers zeroed.
    pub fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads register `idx`.
    pub fn read(&self, idx: usize) -> i64 {
        self.regs[idx]
    }

    /// Writes `val` to register `idx`. x0 is not special-cased.
    pub fn write(&mut self, idx: usize, val: i64) {
        self.regs[idx] = val;
    }

    /// All 32 register values in index order.
    pub fn values(&self) -> &[i64; 32] {
        &self.regs
    }

    /// Dumps the register file to stdout, two registers per line.
    pub fn dump(&self) {
        for i in (0..32).step_by(2) {
            println!(
                "x{:<2}={:<20} x{:<2}={:<20}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}

/// The conventional ABI name of a register index.
pub fn abi_name(idx: usize) -> &'static str {
    const NAMES: [&str; 32] = [
        "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3",
        "a4", "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11",
        "t3", "t4", "t5", "t6",
    ];
    NAMES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::decode::parse_register;

    #[test]
    fn abi_names_resolve_back_to_indices() {
        for idx in 0..32 {
            assert_eq!(parse_register(abi_name(idx)), Some(idx));
        }
    }
}
