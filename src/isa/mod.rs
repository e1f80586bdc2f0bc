//! Instruction set model.
//!
//! The simulator runs on structured assembly text, not machine words. This
//! module defines the closed set of supported operations, the decoded
//! instruction record, and the classification used by the statistics
//! counters. The textual decoder itself lives in [`decode`].

use std::fmt;

pub mod decode;

pub use decode::decode;

/// Every operation the simulator understands, one variant per mnemonic.
///
/// Decode, execute, and hazard logic all match on this enum exhaustively, so
/// adding a mnemonic is a compile-time checklist rather than a string hunt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    Add,
    Sub,
    And,
    Or,
    Xor,
    Sll,
    Srl,
    Addi,
    Andi,
    Ori,
    Xori,
    Lw,
    Sw,
    Beq,
    Bne,
    J,
    Jal,
    Jr,
    Jalr,
}

/// Instruction classification reported by the statistics counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstrClass {
    /// Memory loads and stores (`lw`, `sw`).
    DataTransfer,
    /// Branches and jumps.
    Control,
    /// Everything else.
    Alu,
}

impl fmt::Display for InstrClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataTransfer => write!(f, "Data Transfer"),
            Self::Control => write!(f, "Control"),
            Self::Alu => write!(f, "ALU"),
        }
    }
}

impl Opcode {
    /// Parses a lowercase mnemonic.
    pub fn from_mnemonic(s: &str) -> Option<Self> {
        Some(match s {
            "add" => Self::Add,
            "sub" => Self::Sub,
            "and" => Self::And,
            "or" => Self::Or,
            "xor" => Self::Xor,
            "sll" => Self::Sll,
            "srl" => Self::Srl,
            "addi" => Self::Addi,
            "andi" => Self::Andi,
            "ori" => Self::Ori,
            "xori" => Self::Xori,
            "lw" => Self::Lw,
            "sw" => Self::Sw,
            "beq" => Self::Beq,
            "bne" => Self::Bne,
            "j" => Self::J,
            "jal" => Self::Jal,
            "jr" => Self::Jr,
            "jalr" => Self::Jalr,
            _ => return None,
        })
    }

    /// The assembly mnemonic for this operation.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Addi => "addi",
            Self::Andi => "andi",
            Self::Ori => "ori",
            Self::Xori => "xori",
            Self::Lw => "lw",
            Self::Sw => "sw",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::J => "j",
            Self::Jal => "jal",
            Self::Jr => "jr",
            Self::Jalr => "jalr",
        }
    }

    /// Classification used by the per-type instruction counters.
    pub fn class(self) -> InstrClass {
        match self {
            Self::Lw | Self::Sw => InstrClass::DataTransfer,
            Self::Beq | Self::Bne | Self::J | Self::Jal | Self::Jr | Self::Jalr => {
                InstrClass::Control
            }
            _ => InstrClass::Alu,
        }
    }

    /// Whether this is a branch or jump resolved in Execute.
    pub fn is_control(self) -> bool {
        self.class() == InstrClass::Control
    }

    /// Whether the operation writes a destination register at Writeback.
    ///
    /// `jr` carries no destination field at all; the opcodes listed here are
    /// the ones excluded even when a destination field is present.
    pub fn writes_rd(self) -> bool {
        !matches!(self, Self::Sw | Self::Beq | Self::Bne | Self::J)
    }
}

/// A decoded instruction: the operation plus whichever operand fields its
/// format carries.
///
/// Produced by [`decode`]; a decode failure yields no record at all rather
/// than a partially filled one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    /// Destination register index, when the format has one.
    pub rd: Option<usize>,
    /// First source register index.
    pub rs1: Option<usize>,
    /// Second source register index.
    pub rs2: Option<usize>,
    /// Sign-carrying immediate; 0 stands in for unparseable immediate text.
    pub imm: Option<i64>,
}

impl Instruction {
    /// Classification of this instruction.
    pub fn class(&self) -> InstrClass {
        self.opcode.class()
    }
}

impl fmt::Display for Instruction {
    /// Re-encodes the instruction as canonical assembly text.
    ///
    /// Decoding the output reproduces the same record, which is what the
    /// round-trip tests rely on.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode.mnemonic();
        let rd = self.rd.unwrap_or(0);
        let rs1 = self.rs1.unwrap_or(0);
        let rs2 = self.rs2.unwrap_or(0);
        let imm = self.imm.unwrap_or(0);
        match self.opcode {
            Opcode::Add
            | Opcode::Sub
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Sll
            | Opcode::Srl => write!(f, "{op} x{rd}, x{rs1}, x{rs2}"),
            Opcode::Addi | Opcode::Andi | Opcode::Ori | Opcode::Xori => {
                write!(f, "{op} x{rd}, x{rs1}, {imm}")
            }
            Opcode::Lw => write!(f, "lw x{rd}, {imm}(x{rs1})"),
            Opcode::Sw => write!(f, "sw x{rs2}, {imm}(x{rs1})"),
            Opcode::Beq | Opcode::Bne => write!(f, "{op} x{rs1}, x{rs2}, {imm}"),
            Opcode::J => write!(f, "j {imm}"),
            Opcode::Jal => write!(f, "jal x{rd}, {imm}"),
            Opcode::Jr => write!(f, "jr x{rs1}"),
            Opcode::Jalr => write!(f, "jalr x{rd}, x{rs1}"),
        }
    }
}
