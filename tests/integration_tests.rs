//! End-to-end program runs through the processor.

use pretty_assertions::assert_eq;

use riscv_pipesim::common::SimError;
use riscv_pipesim::config::SimConfig;
use riscv_pipesim::core::pipeline::outcome::Stage;
use riscv_pipesim::core::processor::HazardKind;
use riscv_pipesim::core::Processor;
use riscv_pipesim::sim::loader::parse_program;

fn config(pipelined: bool, forwarding: bool) -> SimConfig {
    let mut config = SimConfig::default();
    config.pipeline.enabled = pipelined;
    config.pipeline.forwarding = forwarding;
    config
}

/// Builds a processor with register tracing enabled so final state can be
/// inspected.
fn processor(program: &str, pipelined: bool, forwarding: bool) -> Processor {
    let mut config = config(pipelined, forwarding);
    config.trace.registers = true;
    Processor::new(parse_program(program), Vec::new(), &config)
}

fn final_registers(p: &Processor) -> [i64; 32] {
    *p.register_file().expect("register tracing enabled").values()
}

/// Tests the basic arithmetic scenario: two immediates and their sum, with
/// forwarding keeping the pipeline stall-free.
#[test]
fn arithmetic_program_completes_without_stalls() {
    let program = "\
addi x1, x0, 5
addi x2, x0, 10
add x3, x1, x2
";
    let mut p = processor(program, true, true);
    p.run().unwrap();

    let regs = final_registers(&p);
    assert_eq!(regs[1], 5);
    assert_eq!(regs[2], 10);
    assert_eq!(regs[3], 15);

    let stats = p.statistics();
    assert_eq!(stats.instructions, 3);
    assert_eq!(stats.cycles, 7);
    assert_eq!(stats.total_stalls, 0);
    assert!((stats.cpi() - 7.0 / 3.0).abs() < 1e-9);
}

/// Tests that a dependency-free program reports no hazards at all.
#[test]
fn independent_program_reports_no_hazards() {
    let program = "\
addi x1, x0, 1
addi x2, x0, 2
addi x3, x0, 3
";
    let mut p = processor(program, true, true);
    p.run().unwrap();

    let stats = p.statistics();
    assert_eq!(stats.data_hazards, 0);
    assert_eq!(stats.control_hazards, 0);
    assert_eq!(stats.total_stalls, 0);
    assert!(p.hazard_log().is_empty());
}

/// Tests the load-use scenario end to end, including the hazard log.
#[test]
fn load_use_program_stalls_once_and_logs_it() {
    let program = "\
lw x1, 0(x0)
add x2, x1, x1
";
    let mut config = config(true, true);
    config.trace.registers = true;
    let mut p = Processor::new(parse_program(program), vec![(0, 21)], &config);
    p.run().unwrap();

    let regs = final_registers(&p);
    assert_eq!(regs[1], 21);
    assert_eq!(regs[2], 42);

    let stats = p.statistics();
    assert_eq!(stats.total_stalls, 1);
    assert_eq!(stats.stalls_data_hazards, 1);
    assert!(stats.data_hazards >= 1);

    assert!(p
        .hazard_log()
        .iter()
        .any(|h| h.kind == HazardKind::Data && h.stall));
}

/// Tests the branch misprediction scenario: the wrong-path instruction is
/// squashed and the control hazard is logged.
#[test]
fn misprediction_program_squashes_wrong_path() {
    let program = "\
beq x0, x0, 8
addi x1, x0, 99
addi x2, x0, 7
";
    let mut p = processor(program, true, true);
    p.run().unwrap();

    let regs = final_registers(&p);
    assert_eq!(regs[1], 0, "wrong-path instruction must not retire");
    assert_eq!(regs[2], 7);

    let stats = p.statistics();
    assert_eq!(stats.instructions, 2);
    assert_eq!(stats.branch_mispredictions, 1);
    assert_eq!(stats.control_hazards, 1);
    assert!(p
        .hazard_log()
        .iter()
        .any(|h| h.kind == HazardKind::Control));
}

/// Tests a countdown loop: the 1-bit predictor mispredicts on the first
/// taken branch and again on the final fall-through.
#[test]
fn countdown_loop_trains_the_predictor() {
    let program = "\
addi x1, x0, 2
addi x1, x1, -1
bne x1, x0, -4
";
    let mut p = processor(program, true, true);
    p.run().unwrap();

    let regs = final_registers(&p);
    assert_eq!(regs[1], 0);

    let stats = p.statistics();
    assert_eq!(stats.instructions, 5);
    assert_eq!(stats.branch_mispredictions, 2);
    assert_eq!(stats.control_instructions, 2);
}

/// Tests that all three execution modes agree on architectural state.
#[test]
fn execution_modes_agree_on_final_state() {
    let program = "\
addi x1, x0, 6
addi x2, x0, 7
add x3, x1, x2
sw x3, 0(x0)
lw x4, 0(x0)
sub x5, x4, x1
bne x5, x1, 8
addi x6, x0, 111
addi x7, x0, 222
";
    let mut reference: Option<[i64; 32]> = None;
    let mut cycles = Vec::new();
    for (pipelined, forwarding) in [(true, true), (true, false), (false, true)] {
        let mut p = processor(program, pipelined, forwarding);
        p.run().unwrap();
        let regs = final_registers(&p);
        match &reference {
            Some(expected) => assert_eq!(
                &regs, expected,
                "mode (pipelined={pipelined}, forwarding={forwarding}) diverged"
            ),
            None => reference = Some(regs),
        }
        cycles.push(p.statistics().cycles);
    }
    assert!(
        cycles[0] <= cycles[1],
        "forwarding should never cost cycles: {cycles:?}"
    );
}

/// Tests the followed-instruction trace: only the requested sequence number
/// appears, from Fetch through Writeback.
#[test]
fn follow_trace_covers_one_instruction() {
    let program = "\
lw x1, 0(x0)
add x2, x1, x1
";
    let mut config = config(true, true);
    config.trace.instruction = Some(2);
    let mut p = Processor::new(parse_program(program), vec![(0, 3)], &config);
    p.run().unwrap();

    let trace = p.instruction_trace();
    assert!(!trace.is_empty());
    assert!(trace.iter().all(|e| e.instruction == "add x2, x1, x1"));
    assert_eq!(trace.first().unwrap().stage, Some(Stage::Fetch));
    assert_eq!(trace.last().unwrap().stage, Some(Stage::Writeback));
    assert!(trace.iter().any(|e| e.stall), "the load-use stall should show");
}

/// Tests the runaway-program guard.
#[test]
fn infinite_loop_hits_the_cycle_limit() {
    let mut config = config(true, true);
    config.limits.max_cycles = 50;
    let mut p = Processor::new(parse_program("j 0\n"), Vec::new(), &config);

    match p.run() {
        Err(SimError::CycleLimit(50)) => {}
        other => panic!("expected cycle limit error, got {other:?}"),
    }
    assert!(!p.finished());
}

/// Tests that an empty program drains immediately.
#[test]
fn empty_program_finishes_on_first_cycle() {
    let p_config = config(true, true);
    let mut p = Processor::new(Vec::new(), Vec::new(), &p_config);
    assert!(p.execute_cycle());
    assert!(p.finished());
    assert_eq!(p.statistics().instructions, 0);
    assert_eq!(p.statistics().cycles, 1);
}

/// Tests predictor state exposure through the tracing gate.
#[test]
fn predictor_state_is_gated_by_config() {
    let program = "beq x0, x0, 8\naddi x1, x0, 1\naddi x2, x0, 2\n";

    let mut p = processor(program, true, true);
    p.run().unwrap();
    assert!(p.predictor_state().is_none(), "gate defaults closed");

    let mut config = config(true, true);
    config.trace.predictor = true;
    let mut p = Processor::new(parse_program(program), Vec::new(), &config);
    p.run().unwrap();
    let state = p.predictor_state().expect("gate open");
    assert_eq!(state.pht.len(), 1);
    assert!(state.pht[0].taken);
    assert_eq!(state.btb[0].target, 8);
}
