//! Variant equivalence: forwarding is a performance optimization, not a
//! semantic change. For any terminating program the stall-only and
//! forwarding engines must agree on the final architectural state.

use proptest::prelude::*;

use apex_sim::config::MachineConfig;
use apex_sim::core::{Cpu, HazardMode};
use apex_sim::isa::{Instruction, Opcode};

/// Strategy for one register-writing instruction over the 16 registers.
fn arb_writer() -> impl Strategy<Value = Instruction> {
    let arb_alu_opcode = prop_oneof![
        Just(Opcode::Add),
        Just(Opcode::Sub),
        Just(Opcode::Mul),
        Just(Opcode::And),
        Just(Opcode::Or),
        Just(Opcode::ExOr),
    ];
    prop_oneof![
        (0usize..16, -500i32..500).prop_map(|(rd, imm)| Instruction {
            opcode: Opcode::Movc,
            rd: Some(rd),
            rs1: None,
            rs2: None,
            rs3: None,
            imm,
        }),
        (arb_alu_opcode, 0usize..16, 0usize..16, 0usize..16).prop_map(
            |(opcode, rd, rs1, rs2)| Instruction {
                opcode,
                rd: Some(rd),
                rs1: Some(rs1),
                rs2: Some(rs2),
                rs3: None,
                imm: 0,
            }
        ),
    ]
}

/// Strategy for a terminating straight-line program.
fn arb_program() -> impl Strategy<Value = Vec<Instruction>> {
    prop::collection::vec(arb_writer(), 1..30).prop_map(|mut program| {
        program.push(Instruction {
            opcode: Opcode::Halt,
            rd: None,
            rs1: None,
            rs2: None,
            rs3: None,
            imm: 0,
        });
        program
    })
}

/// Runs a program under one hazard mode and returns the final registers.
fn final_registers(program: Vec<Instruction>, mode: HazardMode) -> (Vec<i32>, bool, u64) {
    let mut cpu = Cpu::new(program, mode, &MachineConfig::default());
    let outcome = cpu.run(1000).expect("straight-line programs cannot fault");
    let regs = cpu.regs.entries().map(|(value, _)| value).collect();
    (regs, outcome.halted, cpu.stats.instructions_retired)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The two variants agree on the final register file, both halt,
    /// and both retire every instruction exactly once.
    #[test]
    fn stall_and_forwarding_agree(program in arb_program()) {
        let len = program.len() as u64;
        let (stall_regs, stall_halted, stall_retired) =
            final_registers(program.clone(), HazardMode::Stall);
        let (fwd_regs, fwd_halted, fwd_retired) =
            final_registers(program, HazardMode::Forwarding);

        prop_assert!(stall_halted);
        prop_assert!(fwd_halted);
        prop_assert_eq!(stall_retired, len);
        prop_assert_eq!(fwd_retired, len);
        prop_assert_eq!(stall_regs, fwd_regs);
    }
}
