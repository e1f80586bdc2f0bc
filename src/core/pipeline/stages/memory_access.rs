//! Data memory access.

use crate::core::pipeline::outcome::{CycleOutcome, Slot, Stage};
use crate::core::pipeline::Pipeline;
use crate::isa::Opcode;

/// Performs the memory access for the instruction in EX/MEM and moves it
/// into MEM/WB. Only `lw` and `sw` touch memory; everything else passes
/// straight through.
pub fn memory_stage(pl: &mut Pipeline, out: &mut CycleOutcome) {
    if !pl.ex_mem.valid {
        pl.slots.memory = Slot::Empty;
        return;
    }

    let pc = pl.ex_mem.pc;
    let instruction = pl.ex_mem.instruction.clone();
    let seq = pl.ex_mem.seq;
    let parsed = pl.ex_mem.decoded.clone();
    let alu_result = pl.ex_mem.alu_result;
    let rs2_val = pl.ex_mem.rs2_val;

    let mut memory_data = None;
    match parsed.as_ref().map(|d| d.opcode) {
        Some(Opcode::Lw) => {
            let addr = alu_result.unwrap_or(0) as u64;
            memory_data = Some(pl.data.read(addr));
        }
        Some(Opcode::Sw) => {
            let addr = alu_result.unwrap_or(0) as u64;
            pl.data.write(addr, rs2_val);
        }
        _ => {}
    }

    pl.mem_wb.clear();
    pl.mem_wb.valid = true;
    pl.mem_wb.pc = pc;
    pl.mem_wb.instruction = instruction.clone();
    pl.mem_wb.seq = seq;
    pl.mem_wb.decoded = parsed.clone();
    pl.mem_wb.alu_result = alu_result;
    pl.mem_wb.memory_data = memory_data;

    pl.ex_mem.clear();

    pl.slots.memory = if parsed.is_some() {
        Slot::Busy(instruction.clone())
    } else {
        Slot::Malformed(instruction.clone())
    };
    out.report(&instruction, pc, Stage::Memory, seq);
}
