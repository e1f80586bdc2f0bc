//! Inter-stage pipeline latches.
//!
//! The four latches (IF/ID, ID/EX, EX/MEM, MEM/WB) carry one instruction's
//! state between stages. All four share one layout: earlier stages simply
//! leave the downstream fields at their reset values. A latch is consumed by
//! the stage that reads it, which clears every field so stale results can
//! never leak into a later instruction.

use crate::isa::Instruction;

/// One pipeline latch.
///
/// `valid` is the occupancy bit: a cleared latch is a bubble and the stage
/// behind it does no work that cycle. Clearing resets every field, not just
/// `valid`; downstream consumers snapshot anything they need before the
/// reset (see the hazard unit's forwarding records).
#[derive(Clone, Debug)]
pub struct Latch {
    /// Display name, e.g. `"IF/ID"`. Fixed at construction.
    pub name: &'static str,
    /// Occupancy bit. False means bubble.
    pub valid: bool,
    /// Address the instruction was fetched from.
    pub pc: u64,
    /// Raw instruction text as fetched.
    pub instruction: String,
    /// Fetch-order sequence number, monotonic across the run.
    pub seq: u64,
    /// Decoded form, populated by Decode. `None` before Decode or when the
    /// text was rejected; a malformed instruction still flows through the
    /// pipe inertly.
    pub decoded: Option<Instruction>,
    /// First source operand value, read by Decode.
    pub rs1_val: i64,
    /// Second source operand value, read by Decode.
    pub rs2_val: i64,
    /// ALU result or effective address, populated by Execute.
    pub alu_result: Option<i64>,
    /// Word loaded from memory, populated by the Memory stage for `lw`.
    pub memory_data: Option<i64>,
    /// Actual branch outcome, resolved by Execute.
    pub branch_taken: bool,
    /// Actual branch target, resolved by Execute for taken branches.
    pub branch_target: Option<u64>,
}

impl Latch {
    /// Creates an empty latch with the given display name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            valid: false,
            pc: 0,
            instruction: String::new(),
            seq: 0,
            decoded: None,
            rs1_val: 0,
            rs2_val: 0,
            alu_result: None,
            memory_data: None,
            branch_taken: false,
            branch_target: None,
        }
    }

    /// Resets every field except the name, turning the latch into a bubble.
    pub fn clear(&mut self) {
        self.valid = false;
        self.pc = 0;
        self.instruction.clear();
        self.seq = 0;
        self.decoded = None;
        self.rs1_val = 0;
        self.rs2_val = 0;
        self.alu_result = None;
        self.memory_data = None;
        self.branch_taken = false;
        self.branch_target = None;
    }
}
