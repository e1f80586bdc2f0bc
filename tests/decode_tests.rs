//! Textual instruction decoder tests.

use pretty_assertions::assert_eq;

use riscv_pipesim::isa::decode::{decode, parse_address, parse_immediate, parse_register};
use riscv_pipesim::isa::{InstrClass, Opcode};

/// Tests decoding of a three-register ALU instruction.
#[test]
fn decodes_r_type() {
    let inst = decode("add x3, x1, x2").unwrap();
    assert_eq!(inst.opcode, Opcode::Add);
    assert_eq!(inst.rd, Some(3));
    assert_eq!(inst.rs1, Some(1));
    assert_eq!(inst.rs2, Some(2));
    assert_eq!(inst.imm, None);
}

/// Tests decoding of a register-immediate instruction.
#[test]
fn decodes_i_type() {
    let inst = decode("addi x1, x0, -5").unwrap();
    assert_eq!(inst.opcode, Opcode::Addi);
    assert_eq!(inst.rd, Some(1));
    assert_eq!(inst.rs1, Some(0));
    assert_eq!(inst.imm, Some(-5));
}

/// Tests decoding of loads and stores with `imm(reg)` addressing.
#[test]
fn decodes_memory_ops() {
    let lw = decode("lw x5, 8(x2)").unwrap();
    assert_eq!(lw.opcode, Opcode::Lw);
    assert_eq!(lw.rd, Some(5));
    assert_eq!(lw.rs1, Some(2));
    assert_eq!(lw.imm, Some(8));

    let sw = decode("sw x5, -4(sp)").unwrap();
    assert_eq!(sw.opcode, Opcode::Sw);
    assert_eq!(sw.rs2, Some(5));
    assert_eq!(sw.rs1, Some(2));
    assert_eq!(sw.imm, Some(-4));
    assert_eq!(sw.rd, None);
}

/// Tests decoding of branches and the four jump forms.
#[test]
fn decodes_control_flow() {
    let beq = decode("beq x1, x2, 16").unwrap();
    assert_eq!(beq.opcode, Opcode::Beq);
    assert_eq!((beq.rs1, beq.rs2, beq.imm), (Some(1), Some(2), Some(16)));
    assert_eq!(beq.rd, None);

    let j = decode("j -8").unwrap();
    assert_eq!((j.opcode, j.imm), (Opcode::J, Some(-8)));

    let jal = decode("jal ra, 32").unwrap();
    assert_eq!((jal.opcode, jal.rd, jal.imm), (Opcode::Jal, Some(1), Some(32)));

    let jr = decode("jr ra").unwrap();
    assert_eq!((jr.opcode, jr.rs1, jr.rd), (Opcode::Jr, Some(1), None));

    let jalr = decode("jalr x1, x5").unwrap();
    assert_eq!((jalr.opcode, jalr.rd, jalr.rs1), (Opcode::Jalr, Some(1), Some(5)));
}

/// Tests that ABI register names and numeric names resolve identically.
#[test]
fn abi_and_numeric_names_agree() {
    let abi = decode("add a0, t0, s1").unwrap();
    let numeric = decode("add x10, x5, x9").unwrap();
    assert_eq!(abi, numeric);
    assert_eq!(parse_register("fp"), parse_register("s0"));
    assert_eq!(parse_register("x31,"), Some(31));
}

/// Tests the decoder's fail-closed behavior on malformed text.
#[test]
fn rejects_malformed_text() {
    assert_eq!(decode(""), None);
    assert_eq!(decode("mul x1, x2, x3"), None);
    assert_eq!(decode("add x1, x2"), None);
    assert_eq!(decode("add x1, x2, x3, x4"), None);
    assert_eq!(decode("add x1, x2, x99"), None);
    assert_eq!(decode("lw x1, 4[x2]"), None);
    assert_eq!(decode("lw x1, )4(x2"), None);
}

/// Tests immediate leniency: hex, binary, and garbage-as-zero.
#[test]
fn immediate_leniency() {
    assert_eq!(parse_immediate("0x10"), 16);
    assert_eq!(parse_immediate("0X10"), 16);
    assert_eq!(parse_immediate("0b101"), 5);
    assert_eq!(parse_immediate("0B101"), 5);
    assert_eq!(parse_immediate("12,"), 12);
    assert_eq!(parse_immediate("banana"), 0);
    assert_eq!(parse_immediate("0xzz"), 0);

    // An unparseable immediate never fails the whole decode.
    let inst = decode("addi x1, x0, garbage").unwrap();
    assert_eq!(inst.imm, Some(0));
}

/// Tests the `imm(reg)` address form, including an empty offset.
#[test]
fn address_operand_forms() {
    assert_eq!(parse_address("8(x2)"), Some((8, 2)));
    assert_eq!(parse_address("(x2)"), Some((0, 2)));
    assert_eq!(parse_address("-12(sp)"), Some((-12, 2)));
    assert_eq!(parse_address("0x10(t0)"), Some((16, 5)));
    assert_eq!(parse_address("8x2"), None);
    assert_eq!(parse_address("8)x2("), None);
    assert_eq!(parse_address("8(x99)"), None);
}

/// Tests that mnemonics are case-insensitive.
#[test]
fn mnemonic_case_insensitive() {
    assert_eq!(decode("ADD x1, x2, x3"), decode("add x1, x2, x3"));
    assert!(decode("Lw x1, 0(x2)").is_some());
}

/// Tests the canonical re-encoding round trip for every format.
#[test]
fn display_round_trips() {
    let lines = [
        "add x3, x1, x2",
        "srl x4, x5, x6",
        "addi x1, x0, -7",
        "xori x2, x2, 255",
        "lw x5, 8(x2)",
        "sw x5, -4(x2)",
        "beq x1, x2, 16",
        "bne x3, x0, -8",
        "j 24",
        "jal x1, 32",
        "jr x1",
        "jalr x1, x5",
    ];
    for line in lines {
        let inst = decode(line).unwrap();
        let rendered = inst.to_string();
        assert_eq!(decode(&rendered), Some(inst), "round trip failed for {line}");
    }
}

/// Tests instruction classification.
#[test]
fn classifies_instructions() {
    assert_eq!(decode("lw x1, 0(x2)").unwrap().class(), InstrClass::DataTransfer);
    assert_eq!(decode("sw x1, 0(x2)").unwrap().class(), InstrClass::DataTransfer);
    assert_eq!(decode("beq x1, x2, 4").unwrap().class(), InstrClass::Control);
    assert_eq!(decode("jal x1, 4").unwrap().class(), InstrClass::Control);
    assert_eq!(decode("add x1, x2, x3").unwrap().class(), InstrClass::Alu);
    assert_eq!(decode("andi x1, x2, 3").unwrap().class(), InstrClass::Alu);
}
