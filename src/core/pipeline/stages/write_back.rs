//! Writeback Stage.
//!
//! Commits register-writing instructions to the architectural register
//! file, revalidating the destination and retiring its pending-write
//! entry. A retiring HALT stops the machine; the run loop observes
//! `halted` and exits.

use super::view;
use crate::core::trace::{CycleTrace, Stage};
use crate::core::Cpu;
use crate::isa::Opcode;

/// Executes one cycle of the Writeback stage.
pub fn tick(cpu: &mut Cpu, trace: &mut CycleTrace) {
    let Some(inflight) = cpu.latches.write_back.take_ready() else {
        trace.record(Stage::Writeback, None);
        return;
    };
    trace.record(Stage::Writeback, Some(view(cpu, &inflight)));

    if let Some(rd) = inflight.inst.rd {
        cpu.regs.commit(rd, inflight.buffer);
        cpu.forwards.clear(rd);
    }

    let opcode = inflight.inst.opcode;
    if opcode == Opcode::Halt {
        cpu.halted = true;
    } else if opcode.is_load() {
        cpu.stats.inst_load += 1;
    } else if opcode.is_store() {
        cpu.stats.inst_store += 1;
    } else if opcode.is_control() {
        cpu.stats.inst_control += 1;
    } else {
        cpu.stats.inst_alu += 1;
    }
    cpu.stats.instructions_retired += 1;
}
