//! Instruction fetch.

use tracing::trace;

use crate::core::branch_predictor::BranchPredictor;
use crate::core::pipeline::outcome::{CycleOutcome, PredictionEvent, Slot, Stage};
use crate::core::pipeline::Pipeline;
use crate::isa::decode::decode;

/// Fetches the instruction at PC into IF/ID and advances PC.
///
/// Control instructions consult the branch predictor: the next PC follows
/// the prediction, and a speculative entry is committed to the predictor
/// tables immediately so back-to-back fetches of the same branch see it.
/// A stalled front end fetches nothing and leaves PC alone.
pub fn fetch_stage(pl: &mut Pipeline, bp: &mut BranchPredictor, out: &mut CycleOutcome) {
    if pl.stall {
        pl.slots.fetch = Slot::Held(None);
        return;
    }

    if pl.pc >= pl.text.extent() {
        pl.slots.fetch = Slot::Empty;
        return;
    }

    let pc = pl.pc;
    let instruction = pl.text.read(pc);

    let is_control = decode(&instruction).is_some_and(|d| d.opcode.is_control());
    let next_pc = if is_control {
        let pred = bp.predict(pc);
        bp.update_entry(pc, pred.target, pred.taken);
        out.prediction = Some(PredictionEvent {
            pc,
            taken: pred.taken,
            target: pred.target,
        });
        trace!(pc, taken = pred.taken, target = pred.target, "branch predicted");
        if pred.taken { pred.target } else { pc + 4 }
    } else {
        pc + 4
    };

    pl.fetched += 1;
    let seq = pl.fetched;

    pl.if_id.clear();
    pl.if_id.valid = true;
    pl.if_id.pc = pc;
    pl.if_id.instruction = instruction.clone();
    pl.if_id.seq = seq;

    pl.pc = next_pc;

    pl.slots.fetch = Slot::Busy(instruction.clone());
    out.report(&instruction, pc, Stage::Fetch, seq);
}
