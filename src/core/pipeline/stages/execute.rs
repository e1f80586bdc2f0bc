//! Execute and branch resolution.

use tracing::debug;

use crate::core::branch_predictor::BranchPredictor;
use crate::core::pipeline::outcome::{CycleOutcome, Slot, Stage};
use crate::core::pipeline::Pipeline;
use crate::isa::{Instruction, Opcode};

/// ALU evaluation for one decoded instruction. Returns the result value (or
/// `None` for instructions that produce nothing) plus the resolved branch
/// outcome and target for control instructions.
pub(super) fn evaluate(
    parsed: &Instruction,
    pc: u64,
    rs1_val: i64,
    rs2_val: i64,
) -> (Option<i64>, bool, Option<u64>) {
    let imm = parsed.imm.unwrap_or(0);
    match parsed.opcode {
        Opcode::Add => (Some(rs1_val.wrapping_add(rs2_val)), false, None),
        Opcode::Sub => (Some(rs1_val.wrapping_sub(rs2_val)), false, None),
        Opcode::And => (Some(rs1_val & rs2_val), false, None),
        Opcode::Or => (Some(rs1_val | rs2_val), false, None),
        Opcode::Xor => (Some(rs1_val ^ rs2_val), false, None),
        Opcode::Sll => (Some(rs1_val.wrapping_shl(rs2_val as u32)), false, None),
        Opcode::Srl => (
            Some((rs1_val as u64).wrapping_shr(rs2_val as u32) as i64),
            false,
            None,
        ),
        Opcode::Addi => (Some(rs1_val.wrapping_add(imm)), false, None),
        Opcode::Andi => (Some(rs1_val & imm), false, None),
        Opcode::Ori => (Some(rs1_val | imm), false, None),
        Opcode::Xori => (Some(rs1_val ^ imm), false, None),
        // Effective address; the Memory stage does the access.
        Opcode::Lw | Opcode::Sw => (Some(rs1_val.wrapping_add(imm)), false, None),
        Opcode::Beq => (None, rs1_val == rs2_val, Some(pc.wrapping_add_signed(imm))),
        Opcode::Bne => (None, rs1_val != rs2_val, Some(pc.wrapping_add_signed(imm))),
        Opcode::J => (None, true, Some(pc.wrapping_add_signed(imm))),
        Opcode::Jal => (
            Some((pc + 4) as i64),
            true,
            Some(pc.wrapping_add_signed(imm)),
        ),
        Opcode::Jr => (None, true, Some(rs1_val as u64)),
        Opcode::Jalr => (Some((pc + 4) as i64), true, Some(rs1_val as u64)),
    }
}

/// Executes the instruction in ID/EX and moves it into EX/MEM.
///
/// Forwarding decisions recorded by the hazard unit on the previous cycle
/// override the register values read at Decode. Control instructions are
/// resolved here against the prediction made at Fetch; a misprediction
/// redirects PC immediately and raises the flush the hazard unit will
/// consume later this same cycle, squashing exactly one wrong-path fetch.
pub fn execute_stage(pl: &mut Pipeline, bp: &mut BranchPredictor, out: &mut CycleOutcome) {
    if !pl.id_ex.valid {
        pl.slots.execute = Slot::Empty;
        return;
    }

    let pc = pl.id_ex.pc;
    let instruction = pl.id_ex.instruction.clone();
    let seq = pl.id_ex.seq;
    let parsed = pl.id_ex.decoded.clone();
    let mut rs1_val = pl.id_ex.rs1_val;
    let mut rs2_val = pl.id_ex.rs2_val;

    if pl.enable_forwarding {
        if let Some(fwd) = pl.forward_rs1.take() {
            rs1_val = fwd.value;
        }
        if let Some(fwd) = pl.forward_rs2.take() {
            rs2_val = fwd.value;
        }
    }

    let mut alu_result = None;
    let mut branch_taken = false;
    let mut branch_target = None;

    if let Some(parsed) = &parsed {
        (alu_result, branch_taken, branch_target) = evaluate(parsed, pc, rs1_val, rs2_val);

        if parsed.opcode.is_control() {
            let target = branch_target.unwrap_or(pc + 4);
            let pred = bp.get_prediction(pc);
            let correct =
                pred.taken == branch_taken && (!branch_taken || pred.target == target);
            bp.update(pc, target, branch_taken);

            if !correct {
                pl.flush = true;
                pl.pc = if branch_taken { target } else { pc + 4 };
                debug!(pc, taken = branch_taken, target, "branch mispredicted");
                out.branch_misprediction = true;
                out.flush = true;
                out.control_hazard = true;
                out.hazard_description =
                    Some(format!("Branch misprediction at PC {pc:04x}"));
            }
        }
    }

    pl.ex_mem.clear();
    pl.ex_mem.valid = true;
    pl.ex_mem.pc = pc;
    pl.ex_mem.instruction = instruction.clone();
    pl.ex_mem.seq = seq;
    pl.ex_mem.decoded = parsed.clone();
    // Kept for stores, which write rs2 to memory in the next stage.
    pl.ex_mem.rs2_val = rs2_val;
    pl.ex_mem.alu_result = alu_result;
    pl.ex_mem.branch_taken = branch_taken;
    pl.ex_mem.branch_target = branch_target;

    pl.id_ex.clear();

    pl.slots.execute = if parsed.is_some() {
        Slot::Busy(instruction.clone())
    } else {
        Slot::Malformed(instruction.clone())
    };
    out.report(&instruction, pc, Stage::Execute, seq);
}
