//! Register writeback and retirement.

use tracing::trace;

use crate::core::pipeline::outcome::{CycleOutcome, Slot, Stage};
use crate::core::pipeline::Pipeline;
use crate::isa::{InstrClass, Opcode};

/// Retires the instruction in MEM/WB: writes the destination register if
/// the instruction has one and reports the completion. Malformed text
/// retires too, counted as an ALU completion, so every fetched instruction
/// eventually leaves the pipe.
pub fn wb_stage(pl: &mut Pipeline, out: &mut CycleOutcome) {
    if !pl.mem_wb.valid {
        pl.slots.writeback = Slot::Empty;
        return;
    }

    let pc = pl.mem_wb.pc;
    let instruction = pl.mem_wb.instruction.clone();
    let seq = pl.mem_wb.seq;

    let mut class = InstrClass::Alu;
    let mut malformed = true;
    if let Some(parsed) = &pl.mem_wb.decoded {
        class = parsed.class();
        malformed = false;
        if parsed.opcode.writes_rd() {
            if let Some(rd) = parsed.rd {
                let val = if parsed.opcode == Opcode::Lw {
                    pl.mem_wb.memory_data.unwrap_or(0)
                } else {
                    pl.mem_wb.alu_result.unwrap_or(0)
                };
                trace!(pc, rd, val, "writeback");
                pl.regs.write(rd, val);
            }
        }
    }

    pl.completed += 1;
    out.instruction_completed = true;
    out.completed_class = Some(class);

    pl.mem_wb.clear();

    pl.slots.writeback = if malformed {
        Slot::Malformed(instruction.clone())
    } else {
        Slot::Busy(instruction.clone())
    };
    out.report(&instruction, pc, Stage::Writeback, seq);
}
