//! Textual instruction decoder.
//!
//! Parses one line of assembly text into an [`Instruction`]. The decoder
//! fails closed: a wrong operand count, an unknown mnemonic, an unresolvable
//! register, or a malformed `imm(reg)` addressing operand all yield `None`.
//! Immediate text that is neither decimal, `0x` hex, nor `0b` binary decodes
//! as 0 instead of failing; that leniency is deliberate and load-bearing.

use super::{Instruction, Opcode};

/// Decodes one instruction line, or `None` if the text is malformed.
pub fn decode(text: &str) -> Option<Instruction> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let (&mnemonic, operands) = parts.split_first()?;
    let opcode = Opcode::from_mnemonic(&mnemonic.to_lowercase())?;

    let mut inst = Instruction {
        opcode,
        rd: None,
        rs1: None,
        rs2: None,
        imm: None,
    };

    match opcode {
        // OP rd, rs1, rs2
        Opcode::Add
        | Opcode::Sub
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Sll
        | Opcode::Srl => {
            let [rd, rs1, rs2] = operands else { return None };
            inst.rd = Some(parse_register(rd)?);
            inst.rs1 = Some(parse_register(rs1)?);
            inst.rs2 = Some(parse_register(rs2)?);
        }
        // OP rd, rs1, imm
        Opcode::Addi | Opcode::Andi | Opcode::Ori | Opcode::Xori => {
            let [rd, rs1, imm] = operands else { return None };
            inst.rd = Some(parse_register(rd)?);
            inst.rs1 = Some(parse_register(rs1)?);
            inst.imm = Some(parse_immediate(imm));
        }
        // lw rd, imm(rs1)
        Opcode::Lw => {
            let [rd, addr] = operands else { return None };
            let (offset, base) = parse_address(addr)?;
            inst.rd = Some(parse_register(rd)?);
            inst.rs1 = Some(base);
            inst.imm = Some(offset);
        }
        // sw rs2, imm(rs1)
        Opcode::Sw => {
            let [rs2, addr] = operands else { return None };
            let (offset, base) = parse_address(addr)?;
            inst.rs2 = Some(parse_register(rs2)?);
            inst.rs1 = Some(base);
            inst.imm = Some(offset);
        }
        // OP rs1, rs2, imm
        Opcode::Beq | Opcode::Bne => {
            let [rs1, rs2, imm] = operands else { return None };
            inst.rs1 = Some(parse_register(rs1)?);
            inst.rs2 = Some(parse_register(rs2)?);
            inst.imm = Some(parse_immediate(imm));
        }
        // j imm
        Opcode::J => {
            let [imm] = operands else { return None };
            inst.imm = Some(parse_immediate(imm));
        }
        // jal rd, imm
        Opcode::Jal => {
            let [rd, imm] = operands else { return None };
            inst.rd = Some(parse_register(rd)?);
            inst.imm = Some(parse_immediate(imm));
        }
        // jr rs1
        Opcode::Jr => {
            let [rs1] = operands else { return None };
            inst.rs1 = Some(parse_register(rs1)?);
        }
        // jalr rd, rs1
        Opcode::Jalr => {
            let [rd, rs1] = operands else { return None };
            inst.rd = Some(parse_register(rd)?);
            inst.rs1 = Some(parse_register(rs1)?);
        }
    }

    Some(inst)
}

/// Resolves a register operand to its index.
///
/// Accepts numeric `xN` form (0-31) and the conventional ABI names,
/// with any trailing commas stripped.
pub fn parse_register(text: &str) -> Option<usize> {
    let reg = text.trim_end_matches(',');

    if let Some(num) = reg.strip_prefix('x') {
        if let Ok(idx) = num.parse::<usize>() {
            if idx <= 31 {
                return Some(idx);
            }
        }
    }

    let idx = match reg {
        "zero" => 0,
        "ra" => 1,
        "sp" => 2,
        "gp" => 3,
        "tp" => 4,
        "t0" => 5,
        "t1" => 6,
        "t2" => 7,
        "s0" | "fp" => 8,
        "s1" => 9,
        "a0" => 10,
        "a1" => 11,
        "a2" => 12,
        "a3" => 13,
        "a4" => 14,
        "a5" => 15,
        "a6" => 16,
        "a7" => 17,
        "s2" => 18,
        "s3" => 19,
        "s4" => 20,
        "s5" => 21,
        "s6" => 22,
        "s7" => 23,
        "s8" => 24,
        "s9" => 25,
        "s10" => 26,
        "s11" => 27,
        "t3" => 28,
        "t4" => 29,
        "t5" => 30,
        "t6" => 31,
        _ => return None,
    };
    Some(idx)
}

/// Parses an immediate operand: decimal, `0x`/`0X` hex, or `0b`/`0B` binary.
///
/// Anything else evaluates to 0. Immediates never fail a decode.
pub fn parse_immediate(text: &str) -> i64 {
    let imm = text.trim_end_matches(',');

    if let Ok(v) = imm.parse::<i64>() {
        return v;
    }
    if let Some(hex) = imm.strip_prefix("0x").or_else(|| imm.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).unwrap_or(0);
    }
    if let Some(bin) = imm.strip_prefix("0b").or_else(|| imm.strip_prefix("0B")) {
        return i64::from_str_radix(bin, 2).unwrap_or(0);
    }
    0
}

/// Parses an `imm(reg)` addressing operand into `(offset, register)`.
///
/// Missing parentheses or an unresolvable base register fail the parse.
/// An empty offset means 0.
pub fn parse_address(text: &str) -> Option<(i64, usize)> {
    let open = text.find('(')?;
    let close = text.find(')')?;
    if close < open {
        return None;
    }

    let offset_str = &text[..open];
    let reg_str = &text[open + 1..close];

    let offset = if offset_str.is_empty() {
        0
    } else {
        parse_immediate(offset_str)
    };
    let base = parse_register(reg_str)?;

    Some((offset, base))
}
