//! Memory, register file and loader tests.

use pretty_assertions::assert_eq;

use riscv_pipesim::core::memory::Memory;
use riscv_pipesim::core::register_file::{abi_name, RegisterFile};
use riscv_pipesim::sim::loader::{parse_data, parse_program};

/// Tests that unset memory cells read as the default value.
#[test]
fn memory_reads_default_when_unset() {
    let mem: Memory<i64> = Memory::new();
    assert_eq!(mem.read(0), 0);
    assert_eq!(mem.read(0x1000), 0);
    assert!(mem.is_empty());
}

/// Tests write/read and the extent watermark.
#[test]
fn memory_tracks_extent() {
    let mut mem: Memory<i64> = Memory::new();
    assert_eq!(mem.extent(), 0);
    mem.write(0, 7);
    assert_eq!(mem.extent(), 4);
    mem.write(16, 9);
    assert_eq!(mem.extent(), 20);
    mem.write(4, 1);
    assert_eq!(mem.extent(), 20, "extent never shrinks");
    assert_eq!(mem.read(16), 9);
    assert_eq!(mem.len(), 3);
}

/// Tests sequential layout at 4-byte strides.
#[test]
fn memory_load_seq_strides_by_four() {
    let mut text: Memory<String> = Memory::new();
    text.load_seq(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    assert_eq!(text.read(0), "a");
    assert_eq!(text.read(4), "b");
    assert_eq!(text.read(8), "c");
    assert_eq!(text.extent(), 12);
}

/// Tests merging an address/value map.
#[test]
fn memory_load_map_merges() {
    let mut data: Memory<i64> = Memory::new();
    data.load_map(vec![(0, 10), (8, 20)]);
    data.load_map(vec![(8, 30)]);
    assert_eq!(data.read(0), 10);
    assert_eq!(data.read(8), 30);
}

/// Tests basic register file access; x0 is writable by design here, the
/// hazard unit is what treats it specially.
#[test]
fn register_file_read_write() {
    let mut regs = RegisterFile::new();
    assert_eq!(regs.read(5), 0);
    regs.write(5, -42);
    assert_eq!(regs.read(5), -42);
    regs.write(0, 99);
    assert_eq!(regs.read(0), 99);
    assert_eq!(regs.values()[5], -42);
}

/// Tests the ABI name table endpoints.
#[test]
fn abi_name_table() {
    assert_eq!(abi_name(0), "zero");
    assert_eq!(abi_name(1), "ra");
    assert_eq!(abi_name(8), "s0");
    assert_eq!(abi_name(31), "t6");
}

/// Tests program parsing: comment stripping and blank-line removal.
#[test]
fn parse_program_strips_comments_and_blanks() {
    let text = "\
# setup
addi x1, x0, 5

add x2, x1, x1   # double it
   \t
# done
";
    let program = parse_program(text);
    assert_eq!(program, vec!["addi x1, x0, 5", "add x2, x1, x1"]);
}

/// Tests that a comments-only file yields an empty program.
#[test]
fn parse_program_empty_after_comments() {
    assert!(parse_program("# nothing\n\n# here\n").is_empty());
}

/// Tests data image parsing with decimal and hex fields.
#[test]
fn parse_data_decimal_and_hex() {
    let text = "\
0: 42
0x10: 0x2a
8: -3
";
    let entries = parse_data(text);
    assert_eq!(entries, vec![(0, 42), (16, 42), (8, -3)]);
}

/// Tests that malformed data lines are skipped, not fatal.
#[test]
fn parse_data_skips_malformed_lines() {
    let text = "\
0: 1
not a line
4 8
8: what
12: 5
";
    let entries = parse_data(text);
    assert_eq!(entries, vec![(0, 1), (12, 5)]);
}
