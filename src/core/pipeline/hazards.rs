//! Data hazard detection and forwarding decisions.
//!
//! The hazard unit runs after Execute and Memory have produced their latches
//! and before Decode consumes IF/ID. It compares the source registers of the
//! instruction waiting in IF/ID against the destinations sitting in EX/MEM
//! and MEM/WB, and resolves each RAW dependency with a forward (value
//! snapshotted into the decision record) or a front-end stall.
//!
//! A load in EX/MEM has no data yet, so a dependent consumer always stalls
//! one cycle and picks the value up from MEM/WB. With forwarding disabled,
//! every RAW dependency stalls until the producer has written back.

use tracing::trace;

use super::latches::Latch;
use super::outcome::{
    CycleOutcome, Forward, ForwardSource, ForwardingPath, SrcOperand, StallCause,
};
use super::Pipeline;
use crate::isa::{decode::decode, Opcode};

/// The destination register of the instruction in `latch`, if it will write
/// one. `x0` never raises a hazard.
fn producer_rd(latch: &Latch) -> Option<usize> {
    if !latch.valid {
        return None;
    }
    let decoded = latch.decoded.as_ref()?;
    if !decoded.opcode.writes_rd() {
        return None;
    }
    match decoded.rd {
        Some(rd) if rd != 0 => Some(rd),
        _ => None,
    }
}

/// The value the instruction in `latch` will write back: loaded data for
/// `lw`, the ALU result otherwise.
fn producer_value(latch: &Latch) -> i64 {
    let is_load = matches!(
        latch.decoded.as_ref().map(|d| d.opcode),
        Some(Opcode::Lw)
    );
    if is_load {
        latch.memory_data.unwrap_or(0)
    } else {
        latch.alu_result.unwrap_or(0)
    }
}

/// Runs one cycle of hazard detection.
///
/// Resets the stall and forwarding state, consumes a pending flush by
/// squashing IF/ID, then checks the IF/ID consumer's source operands
/// independently against EX/MEM and MEM/WB. EX/MEM has priority for an
/// operand both latches could feed, since it holds the younger result.
pub fn detect(pl: &mut Pipeline, out: &mut CycleOutcome) {
    pl.stall = false;
    pl.forward_rs1 = None;
    pl.forward_rs2 = None;
    pl.forwarding_paths.clear();

    if pl.flush {
        trace!(squashed = %pl.if_id.instruction, "flush consumed, squashing IF/ID");
        pl.flush = false;
        pl.if_id.clear();
        out.flush = true;
        return;
    }

    if !pl.if_id.valid {
        return;
    }
    // Malformed text carries no register dependencies.
    let Some(consumer) = decode(&pl.if_id.instruction) else {
        return;
    };
    let sources = [(consumer.rs1, SrcOperand::Rs1), (consumer.rs2, SrcOperand::Rs2)];

    let mut stall_needed = false;

    if let Some(rd) = producer_rd(&pl.ex_mem) {
        let is_load = matches!(
            pl.ex_mem.decoded.as_ref().map(|d| d.opcode),
            Some(Opcode::Lw)
        );
        for (src, operand) in sources {
            if src != Some(rd) {
                continue;
            }
            out.data_hazard = true;
            if !pl.enable_forwarding {
                stall_needed = true;
                out.hazard_description = Some(format!(
                    "RAW hazard without forwarding: {} -> {} ({operand})",
                    pl.ex_mem.instruction, pl.if_id.instruction
                ));
            } else if is_load {
                stall_needed = true;
                out.hazard_description = Some(format!(
                    "Load-use hazard: {} -> {} ({operand})",
                    pl.ex_mem.instruction, pl.if_id.instruction
                ));
            } else {
                let fwd = Forward {
                    source: ForwardSource::ExMem,
                    value: pl.ex_mem.alu_result.unwrap_or(0),
                };
                match operand {
                    SrcOperand::Rs1 => pl.forward_rs1 = Some(fwd),
                    SrcOperand::Rs2 => pl.forward_rs2 = Some(fwd),
                }
                pl.forwarding_paths.push(ForwardingPath {
                    source: ForwardSource::ExMem,
                    operand,
                    reg: rd,
                });
                out.hazard_description = Some(format!(
                    "RAW hazard with forwarding: {} -> {} ({operand})",
                    pl.ex_mem.instruction, pl.if_id.instruction
                ));
            }
        }
    }

    if let Some(rd) = producer_rd(&pl.mem_wb) {
        let value = producer_value(&pl.mem_wb);
        for (src, operand) in sources {
            if src != Some(rd) {
                continue;
            }
            // EX/MEM already feeds this operand with a younger value.
            let covered = match operand {
                SrcOperand::Rs1 => pl.forward_rs1.is_some(),
                SrcOperand::Rs2 => pl.forward_rs2.is_some(),
            };
            if covered {
                continue;
            }
            out.data_hazard = true;
            if pl.enable_forwarding {
                let fwd = Forward {
                    source: ForwardSource::MemWb,
                    value,
                };
                match operand {
                    SrcOperand::Rs1 => pl.forward_rs1 = Some(fwd),
                    SrcOperand::Rs2 => pl.forward_rs2 = Some(fwd),
                }
                pl.forwarding_paths.push(ForwardingPath {
                    source: ForwardSource::MemWb,
                    operand,
                    reg: rd,
                });
                out.hazard_description = Some(format!(
                    "RAW hazard with forwarding: {} -> {} ({operand})",
                    pl.mem_wb.instruction, pl.if_id.instruction
                ));
            } else {
                stall_needed = true;
                out.hazard_description = Some(format!(
                    "RAW hazard without forwarding: {} -> {} ({operand})",
                    pl.mem_wb.instruction, pl.if_id.instruction
                ));
            }
        }
    }

    if stall_needed {
        trace!(consumer = %pl.if_id.instruction, "front end stalled on data hazard");
        pl.stall = true;
        pl.forward_rs1 = None;
        pl.forward_rs2 = None;
        pl.forwarding_paths.clear();
        out.stall = true;
        out.stall_cause = Some(StallCause::DataHazard);
    }
}
