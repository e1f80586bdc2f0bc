//! Non-pipelined execution mode.

use crate::core::pipeline::outcome::CycleOutcome;
use crate::core::pipeline::Pipeline;
use crate::isa::decode::decode;
use crate::isa::Opcode;

use super::execute::evaluate;

/// Runs one complete instruction per cycle with no latches, no hazards and
/// no speculation. Used as the baseline when pipelining is disabled.
///
/// Malformed text is skipped without retiring: the PC moves past it but no
/// completion is reported.
pub fn single_cycle(pl: &mut Pipeline, out: &mut CycleOutcome) {
    if pl.pc >= pl.text.extent() {
        out.finished = true;
        return;
    }

    let pc = pl.pc;
    let instruction = pl.text.read(pc);
    pl.fetched += 1;

    out.instruction = Some(instruction.clone());
    out.pc = Some(pc);
    out.seq = Some(pl.fetched);

    let Some(parsed) = decode(&instruction) else {
        pl.pc = pc + 4;
        return;
    };

    let rs1_val = parsed.rs1.map(|r| pl.regs.read(r)).unwrap_or(0);
    let rs2_val = parsed.rs2.map(|r| pl.regs.read(r)).unwrap_or(0);

    let (alu_result, branch_taken, branch_target) = evaluate(&parsed, pc, rs1_val, rs2_val);

    let mut memory_data = None;
    match parsed.opcode {
        Opcode::Lw => {
            let addr = alu_result.unwrap_or(0) as u64;
            memory_data = Some(pl.data.read(addr));
        }
        Opcode::Sw => {
            let addr = alu_result.unwrap_or(0) as u64;
            pl.data.write(addr, rs2_val);
        }
        _ => {}
    }

    if parsed.opcode.writes_rd() {
        if let Some(rd) = parsed.rd {
            let val = if parsed.opcode == Opcode::Lw {
                memory_data.unwrap_or(0)
            } else {
                alu_result.unwrap_or(0)
            };
            pl.regs.write(rd, val);
        }
    }

    pl.pc = if branch_taken {
        branch_target.unwrap_or(pc + 4)
    } else {
        pc + 4
    };

    pl.completed += 1;
    out.instruction_completed = true;
    out.completed_class = Some(parsed.class());
}
