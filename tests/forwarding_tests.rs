//! Tests for the pending-write table and the forwarding variant's bypass
//! behavior.

use pretty_assertions::assert_eq;

use apex_sim::config::MachineConfig;
use apex_sim::core::arch::RegisterFile;
use apex_sim::core::pipeline::hazards::{acquire_operand, OperandSource};
use apex_sim::core::pipeline::ForwardTable;
use apex_sim::core::{Cpu, HazardMode};
use apex_sim::isa::{Instruction, Opcode};

/// Creates a `MOVC rd,#imm` record.
fn movc(rd: usize, imm: i32) -> Instruction {
    Instruction {
        opcode: Opcode::Movc,
        rd: Some(rd),
        rs1: None,
        rs2: None,
        rs3: None,
        imm,
    }
}

/// Creates a three-register ALU record.
fn alu(opcode: Opcode, rd: usize, rs1: usize, rs2: usize) -> Instruction {
    Instruction {
        opcode,
        rd: Some(rd),
        rs1: Some(rs1),
        rs2: Some(rs2),
        rs3: None,
        imm: 0,
    }
}

/// Creates a `LOAD rd,rs1,#imm` record.
fn load(rd: usize, rs1: usize, imm: i32) -> Instruction {
    Instruction {
        opcode: Opcode::Load,
        rd: Some(rd),
        rs1: Some(rs1),
        rs2: None,
        rs3: None,
        imm,
    }
}

/// Creates a `STORE rs1,rs2,#imm` record.
fn store(rs1: usize, rs2: usize, imm: i32) -> Instruction {
    Instruction {
        opcode: Opcode::Store,
        rd: None,
        rs1: Some(rs1),
        rs2: Some(rs2),
        rs3: None,
        imm,
    }
}

/// Creates a `BZ #imm` record.
fn bz(imm: i32) -> Instruction {
    Instruction {
        opcode: Opcode::Bz,
        rd: None,
        rs1: None,
        rs2: None,
        rs3: None,
        imm,
    }
}

/// Creates a `HALT` record.
fn halt() -> Instruction {
    Instruction {
        opcode: Opcode::Halt,
        rd: None,
        rs1: None,
        rs2: None,
        rs3: None,
        imm: 0,
    }
}

/// Runs `program` under `mode` and returns the engine.
fn run(program: Vec<Instruction>, mode: HazardMode) -> Cpu {
    let mut cpu = Cpu::new(program, mode, &MachineConfig::default());
    cpu.run(500).expect("run should not fault");
    cpu
}

/// An allocated entry is invisible until its value is published.
#[test]
fn test_table_publish_gates_lookup() {
    let mut table = ForwardTable::new();
    table.allocate(3);
    assert_eq!(table.lookup(3), None, "unpublished write must not forward");
    table.publish(3, 42);
    assert_eq!(table.lookup(3), Some(42));
    table.clear(3);
    assert_eq!(table.lookup(3), None);
}

/// A valid register always comes from the register file; an invalid one
/// forwards only in forwarding mode, and only once published.
#[test]
fn test_acquire_operand_sources() {
    let mut regs = RegisterFile::new();
    let mut table = ForwardTable::new();
    regs.commit(1, 7);

    assert_eq!(
        acquire_operand(&regs, &table, HazardMode::Stall, 1),
        Some((7, OperandSource::RegisterFile))
    );

    regs.invalidate(2);
    table.allocate(2);
    assert_eq!(acquire_operand(&regs, &table, HazardMode::Forwarding, 2), None);

    table.publish(2, 99);
    assert_eq!(acquire_operand(&regs, &table, HazardMode::Stall, 2), None);
    assert_eq!(
        acquire_operand(&regs, &table, HazardMode::Forwarding, 2),
        Some((99, OperandSource::Forwarded))
    );
}

/// An ALU consumer picks up its producer's result from the bypass network
/// and the run retires sooner than the stall-only variant.
#[test]
fn test_alu_result_bypass() {
    let program = vec![movc(1, 6), alu(Opcode::Mul, 2, 1, 1), halt()];
    let stall = run(program.clone(), HazardMode::Stall);
    let fwd = run(program, HazardMode::Forwarding);
    assert_eq!(stall.regs.read(2), 36);
    assert_eq!(fwd.regs.read(2), 36);
    assert!(fwd.stats.operands_forwarded > 0);
    assert!(fwd.clock < stall.clock);
}

/// A load result is bypassed only after Memory2 produces it: the consumer
/// still gets the loaded value, never a stale buffer.
#[test]
fn test_load_result_bypass_waits_for_memory() {
    let program = vec![
        movc(1, 7),
        movc(2, 0),
        store(1, 2, 9),
        load(4, 2, 9),
        alu(Opcode::Add, 5, 4, 4),
        halt(),
    ];
    let stall = run(program.clone(), HazardMode::Stall);
    let fwd = run(program, HazardMode::Forwarding);
    for cpu in [&stall, &fwd] {
        assert!(cpu.halted);
        assert_eq!(cpu.regs.read(4), 7);
        assert_eq!(cpu.regs.read(5), 14);
    }
    assert!(fwd.stats.operands_forwarded > 0);
    assert!(fwd.clock <= stall.clock);
}

/// A store's data operand is bypassed like any other source.
#[test]
fn test_store_data_bypass() {
    let program = vec![
        movc(2, 0),
        movc(1, 123),
        store(1, 2, 30),
        halt(),
    ];
    let fwd = run(program, HazardMode::Forwarding);
    assert!(fwd.halted);
    assert_eq!(fwd.data_memory.read(30), Some(123));
    assert!(fwd.stats.operands_forwarded > 0);
}

/// The branch condition (the preceding instruction's destination) can be
/// supplied by the bypass network; the branch outcome is unchanged, and
/// the engine records that the last branch dependency was forwarded.
#[test]
fn test_branch_condition_bypass() {
    let program = vec![movc(1, 0), bz(8), movc(2, 99), halt()];
    let stall = run(program.clone(), HazardMode::Stall);
    let fwd = run(program, HazardMode::Forwarding);
    for cpu in [&stall, &fwd] {
        assert!(cpu.halted);
        assert_eq!(cpu.regs.read(2), 0, "taken branch skips the MOVC");
        assert_eq!(cpu.stats.redirects, 1);
    }
    assert!(fwd.stats.operands_forwarded > 0);
    assert!(
        fwd.forwarded,
        "forwarded-condition taken branch must leave the flag set"
    );
    assert!(!stall.forwarded, "stall-only runs never forward a condition");
    assert!(fwd.clock < stall.clock);
}
