//! Instruction decode and register read.

use crate::core::pipeline::outcome::{CycleOutcome, Slot, Stage};
use crate::core::pipeline::Pipeline;
use crate::isa::decode::decode;

/// Decodes the instruction in IF/ID and moves it into ID/EX.
///
/// Source registers are read here; the hazard unit has already decided (just
/// before this stage ran) whether those values are stale and must be
/// replaced by forwards in Execute. During a stall the instruction is held
/// in IF/ID and a bubble flows into ID/EX instead. Text the decoder rejects
/// still moves downstream, marked by an empty decoded slot, so it retires
/// like any other instruction without touching architectural state.
pub fn decode_stage(pl: &mut Pipeline, out: &mut CycleOutcome) {
    if !pl.if_id.valid {
        pl.slots.decode = Slot::Empty;
        return;
    }

    let instruction = pl.if_id.instruction.clone();
    let pc = pl.if_id.pc;
    let seq = pl.if_id.seq;

    let Some(parsed) = decode(&instruction) else {
        if !pl.stall {
            pl.id_ex.clear();
            pl.id_ex.valid = true;
            pl.id_ex.pc = pc;
            pl.id_ex.instruction = instruction.clone();
            pl.id_ex.seq = seq;
            pl.if_id.clear();
        }
        pl.slots.decode = Slot::Malformed(instruction);
        return;
    };

    if pl.stall {
        pl.slots.decode = Slot::Held(Some(instruction.clone()));
        out.report(&instruction, pc, Stage::Decode, seq);
        return;
    }

    let rs1_val = parsed.rs1.map(|r| pl.regs.read(r)).unwrap_or(0);
    let rs2_val = parsed.rs2.map(|r| pl.regs.read(r)).unwrap_or(0);

    pl.id_ex.clear();
    pl.id_ex.valid = true;
    pl.id_ex.pc = pc;
    pl.id_ex.instruction = instruction.clone();
    pl.id_ex.seq = seq;
    pl.id_ex.decoded = Some(parsed);
    pl.id_ex.rs1_val = rs1_val;
    pl.id_ex.rs2_val = rs2_val;

    pl.if_id.clear();

    pl.slots.decode = Slot::Busy(instruction.clone());
    out.report(&instruction, pc, Stage::Decode, seq);
}
