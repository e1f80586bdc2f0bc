//! Per-cycle result records.
//!
//! Every call to [`super::Pipeline::execute_cycle`] produces one
//! [`CycleOutcome`]: a flat record with an explicit field per stage-level
//! event. The processor folds these into its counters and logs; nothing in
//! here is mutated after the cycle that produced it.

use std::fmt;

use crate::isa::InstrClass;

/// The five named pipeline stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Decode,
    Execute,
    Memory,
    Writeback,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "Fetch",
            Self::Decode => "Decode",
            Self::Execute => "Execute",
            Self::Memory => "Memory",
            Self::Writeback => "Writeback",
        };
        write!(f, "{name}")
    }
}

/// Why the front of the pipeline froze this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallCause {
    DataHazard,
    ControlHazard,
}

impl fmt::Display for StallCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataHazard => write!(f, "data_hazard"),
            Self::ControlHazard => write!(f, "control_hazard"),
        }
    }
}

/// A speculative prediction committed at Fetch time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PredictionEvent {
    pub pc: u64,
    pub taken: bool,
    pub target: u64,
}

/// Which pipeline latch a forwarded value comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSource {
    ExMem,
    MemWb,
}

impl fmt::Display for ForwardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExMem => write!(f, "EX/MEM"),
            Self::MemWb => write!(f, "MEM/WB"),
        }
    }
}

/// The source operand a forward feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SrcOperand {
    Rs1,
    Rs2,
}

impl fmt::Display for SrcOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rs1 => write!(f, "RS1"),
            Self::Rs2 => write!(f, "RS2"),
        }
    }
}

/// A forwarding decision made by the hazard unit for one source operand.
///
/// The value is snapshotted at detection time: the producing latch is
/// consumed (and fully reset) before Execute applies the forward on the
/// following cycle, so the decision must carry the data with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Forward {
    pub source: ForwardSource,
    pub value: i64,
}

/// An active forwarding path, reported for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardingPath {
    /// The latch the value was taken from.
    pub source: ForwardSource,
    /// The operand of the executing instruction being fed.
    pub operand: SrcOperand,
    /// The architectural register being bypassed.
    pub reg: usize,
}

impl fmt::Display for ForwardingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> EX ({}: x{})", self.source, self.operand, self.reg)
    }
}

/// Occupancy of one pipeline stage for display purposes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    /// No instruction in the stage this cycle.
    #[default]
    Empty,
    /// The stage processed this instruction.
    Busy(String),
    /// The stage held its instruction (or refrained from fetching) due to a
    /// stall.
    Held(Option<String>),
    /// The stage passed along text the decoder rejected.
    Malformed(String),
}

/// Which instruction, if any, sits in each of the five stages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StageSlots {
    pub fetch: Slot,
    pub decode: Slot,
    pub execute: Slot,
    pub memory: Slot,
    pub writeback: Slot,
}

/// Everything that happened during one clock cycle.
#[derive(Clone, Debug, Default)]
pub struct CycleOutcome {
    /// The program has drained: PC past the text extent, no in-flight work.
    pub finished: bool,
    /// An instruction left Writeback this cycle.
    pub instruction_completed: bool,
    /// Classification of the completed instruction.
    pub completed_class: Option<InstrClass>,
    /// Instruction text reported by the most downstream-to-upstream stage
    /// that ran (Fetch wins when it fetched).
    pub instruction: Option<String>,
    /// PC of the reported instruction.
    pub pc: Option<u64>,
    /// Stage that reported it.
    pub stage: Option<Stage>,
    /// Sequence number of the reported instruction.
    pub seq: Option<u64>,
    /// A RAW dependency was detected this cycle (whether or not forwarding
    /// resolved it).
    pub data_hazard: bool,
    /// A control-flow hazard (misprediction) occurred this cycle.
    pub control_hazard: bool,
    /// Human-readable description of the detected hazard.
    pub hazard_description: Option<String>,
    /// The front of the pipeline is frozen this cycle.
    pub stall: bool,
    /// Why it is frozen.
    pub stall_cause: Option<StallCause>,
    /// The instruction in IF/ID was squashed this cycle.
    pub flush: bool,
    /// Execute found the speculation wrong.
    pub branch_misprediction: bool,
    /// Speculative prediction recorded at Fetch this cycle.
    pub prediction: Option<PredictionEvent>,
}

impl CycleOutcome {
    /// Records which instruction a stage worked on. Stages run from
    /// Writeback down to Fetch, so the last caller wins, mirroring the
    /// trace's preference for the newest activity.
    pub(crate) fn report(&mut self, instruction: &str, pc: u64, stage: Stage, seq: u64) {
        self.instruction = Some(instruction.to_string());
        self.pc = Some(pc);
        self.stage = Some(stage);
        self.seq = Some(seq);
    }
}
