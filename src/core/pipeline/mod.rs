//! The five-stage in-order pipeline.
//!
//! [`Pipeline::execute_cycle`] advances the machine by one clock. Stages run
//! in reverse order (Writeback, Memory, Execute, hazard detection, Decode,
//! Fetch) so each stage consumes the latch its neighbor filled on the
//! previous cycle rather than a value produced moments ago. The hazard unit
//! sits between Execute and Decode in that sequence: it sees the producer
//! latches Execute and Memory just filled and the consumer still waiting in
//! IF/ID.

pub mod hazards;
pub mod latches;
pub mod outcome;
pub mod stages;

use latches::Latch;
use outcome::{CycleOutcome, Forward, ForwardingPath, StageSlots};

use super::branch_predictor::BranchPredictor;
use super::memory::Memory;
use super::register_file::RegisterFile;

/// Datapath state for one simulated core.
#[derive(Clone, Debug)]
pub struct Pipeline {
    /// Text segment: one instruction line per 4-byte address.
    pub text: Memory<String>,
    /// Data segment.
    pub data: Memory<i64>,
    /// Architectural register file.
    pub regs: RegisterFile,
    /// Program counter.
    pub pc: u64,
    /// False selects single-cycle mode.
    pub enable_pipeline: bool,
    /// False makes every RAW dependency stall until writeback.
    pub enable_forwarding: bool,

    pub if_id: Latch,
    pub id_ex: Latch,
    pub ex_mem: Latch,
    pub mem_wb: Latch,

    /// Front-end freeze flag, set by the hazard unit for one cycle at a
    /// time.
    pub stall: bool,
    /// Pending wrong-path squash, raised by Execute and consumed by the
    /// hazard unit in the same cycle.
    pub flush: bool,
    /// Forwarding decisions for the instruction about to enter Execute.
    pub forward_rs1: Option<Forward>,
    pub forward_rs2: Option<Forward>,
    /// Active forwarding paths, kept for display until the next detection.
    pub forwarding_paths: Vec<ForwardingPath>,
    /// Instructions retired.
    pub completed: u64,
    /// Instructions fetched; the source of sequence numbers.
    pub fetched: u64,
    /// Per-stage occupancy of the most recent cycle.
    pub slots: StageSlots,
}

impl Pipeline {
    /// Creates a pipeline over the given memory segments with all latches
    /// empty and PC at 0.
    pub fn new(
        text: Memory<String>,
        data: Memory<i64>,
        enable_pipeline: bool,
        enable_forwarding: bool,
    ) -> Self {
        Self {
            text,
            data,
            regs: RegisterFile::new(),
            pc: 0,
            enable_pipeline,
            enable_forwarding,
            if_id: Latch::new("IF/ID"),
            id_ex: Latch::new("ID/EX"),
            ex_mem: Latch::new("EX/MEM"),
            mem_wb: Latch::new("MEM/WB"),
            stall: false,
            flush: false,
            forward_rs1: None,
            forward_rs2: None,
            forwarding_paths: Vec::new(),
            completed: 0,
            fetched: 0,
            slots: StageSlots::default(),
        }
    }

    /// Advances the machine by one clock cycle.
    pub fn execute_cycle(&mut self, bp: &mut BranchPredictor) -> CycleOutcome {
        let mut out = CycleOutcome::default();

        if !self.enable_pipeline {
            stages::single_cycle::single_cycle(self, &mut out);
            return out;
        }

        stages::write_back::wb_stage(self, &mut out);
        stages::memory_access::memory_stage(self, &mut out);
        stages::execute::execute_stage(self, bp, &mut out);
        hazards::detect(self, &mut out);
        stages::decode::decode_stage(self, &mut out);
        stages::fetch::fetch_stage(self, bp, &mut out);

        if self.drained() {
            out.finished = true;
        }

        out
    }

    /// Whether PC has run past the program and no instruction is in flight.
    fn drained(&self) -> bool {
        self.pc >= self.text.extent()
            && !self.if_id.valid
            && !self.id_ex.valid
            && !self.ex_mem.valid
            && !self.mem_wb.valid
    }

    /// One past the highest text address; the fetch cutoff.
    pub fn program_end(&self) -> u64 {
        self.text.extent()
    }

    /// Instructions retired so far.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// The four latches in pipeline order, for display.
    pub fn latches(&self) -> [&Latch; 4] {
        [&self.if_id, &self.id_ex, &self.ex_mem, &self.mem_wb]
    }

    /// Stage occupancy of the most recent cycle.
    pub fn stage_slots(&self) -> &StageSlots {
        &self.slots
    }

    /// Forwarding paths active in the most recent detection.
    pub fn forwarding_paths(&self) -> &[ForwardingPath] {
        &self.forwarding_paths
    }
}
