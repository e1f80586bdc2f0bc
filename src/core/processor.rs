//! Cycle orchestration and bookkeeping.

use std::fmt;

use tracing::debug;

use crate::common::SimError;
use crate::config::{SimConfig, TraceConfig};
use crate::isa::InstrClass;
use crate::stats::SimStats;

use super::branch_predictor::{BranchPredictor, PredictorState};
use super::memory::Memory;
use super::pipeline::latches::Latch;
use super::pipeline::outcome::{ForwardingPath, Stage, StageSlots, StallCause};
use super::pipeline::Pipeline;
use super::register_file::RegisterFile;

/// One line of the instruction trace.
#[derive(Clone, Debug)]
pub struct TraceEntry {
    pub cycle: u64,
    pub pc: Option<u64>,
    pub instruction: String,
    /// `None` in single-cycle mode, where stages have no meaning.
    pub stage: Option<Stage>,
    pub stall: bool,
    pub flush: bool,
}

/// Classification of a logged hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardKind {
    Data,
    Control,
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => write!(f, "Data Hazard"),
            Self::Control => write!(f, "Control Hazard"),
        }
    }
}

/// One line of the hazard log.
#[derive(Clone, Debug)]
pub struct HazardEntry {
    pub cycle: u64,
    pub kind: HazardKind,
    pub description: String,
    pub stall: bool,
}

/// A complete simulated processor: datapath, predictor, counters and logs.
pub struct Processor {
    pipeline: Pipeline,
    predictor: BranchPredictor,
    stats: SimStats,
    trace: TraceConfig,
    max_cycles: u64,
    instruction_trace: Vec<TraceEntry>,
    hazard_log: Vec<HazardEntry>,
    finished: bool,
}

impl Processor {
    /// Builds a processor over a loaded program and initial data image.
    pub fn new(
        program: Vec<String>,
        data: impl IntoIterator<Item = (u64, i64)>,
        config: &SimConfig,
    ) -> Self {
        let mut text = Memory::new();
        text.load_seq(program);
        let mut data_mem = Memory::new();
        data_mem.load_map(data);

        Self {
            pipeline: Pipeline::new(
                text,
                data_mem,
                config.pipeline.enabled,
                config.pipeline.forwarding,
            ),
            predictor: BranchPredictor::new(),
            stats: SimStats::default(),
            trace: config.trace.clone(),
            max_cycles: config.limits.max_cycles,
            instruction_trace: Vec::new(),
            hazard_log: Vec::new(),
            finished: false,
        }
    }

    /// Runs one cycle and folds its outcome into the statistics and logs.
    /// Returns true once the simulation has finished.
    pub fn execute_cycle(&mut self) -> bool {
        if self.finished {
            return true;
        }

        self.stats.cycles += 1;
        let out = self.pipeline.execute_cycle(&mut self.predictor);

        if out.finished {
            debug!(cycles = self.stats.cycles, "simulation drained");
            self.finished = true;
        }

        if out.instruction_completed {
            self.stats.instructions += 1;
            match out.completed_class {
                Some(InstrClass::DataTransfer) => self.stats.data_transfer_instructions += 1,
                Some(InstrClass::Alu) => self.stats.alu_instructions += 1,
                Some(InstrClass::Control) => self.stats.control_instructions += 1,
                None => {}
            }
        }

        if out.data_hazard {
            self.stats.data_hazards += 1;
            self.hazard_log.push(HazardEntry {
                cycle: self.stats.cycles,
                kind: HazardKind::Data,
                description: out.hazard_description.clone().unwrap_or_default(),
                stall: out.stall,
            });
        }

        if out.control_hazard {
            self.stats.control_hazards += 1;
            self.hazard_log.push(HazardEntry {
                cycle: self.stats.cycles,
                kind: HazardKind::Control,
                description: out.hazard_description.clone().unwrap_or_default(),
                stall: out.stall,
            });
        }

        if out.stall {
            self.stats.total_stalls += 1;
            match out.stall_cause {
                Some(StallCause::DataHazard) => self.stats.stalls_data_hazards += 1,
                Some(StallCause::ControlHazard) => self.stats.stalls_control_hazards += 1,
                None => {}
            }
        }

        if out.branch_misprediction {
            self.stats.branch_mispredictions += 1;
        }

        if let Some(instruction) = &out.instruction {
            let followed = match self.trace.instruction {
                Some(seq) => out.seq == Some(seq),
                None => true,
            };
            if followed {
                self.instruction_trace.push(TraceEntry {
                    cycle: self.stats.cycles,
                    pc: out.pc,
                    instruction: instruction.clone(),
                    stage: out.stage,
                    stall: out.stall,
                    flush: out.flush,
                });
            }
        }

        self.finished
    }

    /// Runs cycles until the program drains, or fails once the cycle limit
    /// is hit.
    pub fn run(&mut self) -> Result<(), SimError> {
        while !self.finished {
            if self.stats.cycles >= self.max_cycles {
                return Err(SimError::CycleLimit(self.max_cycles));
            }
            let _ = self.execute_cycle();
        }
        Ok(())
    }

    /// Whether the simulation has drained.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Accumulated run statistics.
    pub fn statistics(&self) -> &SimStats {
        &self.stats
    }

    /// Per-stage occupancy of the most recent cycle.
    pub fn stage_occupancy(&self) -> &StageSlots {
        self.pipeline.stage_slots()
    }

    /// Latch contents, when pipeline tracing is enabled.
    pub fn pipeline_registers(&self) -> Option<[&Latch; 4]> {
        self.trace.pipeline.then(|| self.pipeline.latches())
    }

    /// Register file contents, when register tracing is enabled.
    pub fn register_file(&self) -> Option<&RegisterFile> {
        self.trace.registers.then_some(&self.pipeline.regs)
    }

    /// Predictor table contents, when predictor tracing is enabled.
    pub fn predictor_state(&self) -> Option<PredictorState> {
        self.trace.predictor.then(|| self.predictor.state())
    }

    /// Forwarding paths active in the most recent cycle.
    pub fn forwarding_paths(&self) -> &[ForwardingPath] {
        self.pipeline.forwarding_paths()
    }

    /// The full (or followed) instruction trace.
    pub fn instruction_trace(&self) -> &[TraceEntry] {
        &self.instruction_trace
    }

    /// Every hazard detected during the run.
    pub fn hazard_log(&self) -> &[HazardEntry] {
        &self.hazard_log
    }
}
