//! Execute Stages.
//!
//! Execute is split across two cycles. Execute1 is a pure pipeline
//! register that imposes the unit's two-cycle latency. Execute2 performs
//! all arithmetic and address computation and resolves control transfers:
//! a taken BZ/BNZ/JUMP stores its target, asserts the fetch redirect, and
//! squashes the three younger instructions in the Fetch, Decode/RF, and
//! Execute1 latches.

use super::{release_issued, view};
use crate::core::pipeline::latches::{InFlight, Latch};
use crate::core::trace::{CycleTrace, Stage};
use crate::core::units::{Alu, AluOp};
use crate::core::Cpu;
use crate::isa::Opcode;

/// Executes one cycle of Execute1: honor a squash, else transfer the
/// occupant to Execute2.
pub fn tick_execute1(cpu: &mut Cpu, trace: &mut CycleTrace) {
    if let Some(dropped) = cpu.latches.execute1.take_squashed() {
        release_issued(cpu, &dropped);
        trace.record(Stage::Execute1, None);
        return;
    }

    match cpu.latches.execute1.take_ready() {
        Some(inflight) => {
            trace.record(Stage::Execute1, Some(view(cpu, &inflight)));
            cpu.latches.execute2 = Latch::Valid(inflight);
        }
        None => trace.record(Stage::Execute1, None),
    }
}

/// Executes one cycle of Execute2.
pub fn tick_execute2(cpu: &mut Cpu, trace: &mut CycleTrace) {
    let Some(mut inflight) = cpu.latches.execute2.take_ready() else {
        trace.record(Stage::Execute2, None);
        return;
    };
    trace.record(Stage::Execute2, Some(view(cpu, &inflight)));

    let [rv1, rv2, rv3] = inflight.operands;
    match inflight.inst.opcode {
        Opcode::Movc => inflight.buffer = inflight.inst.imm,
        Opcode::Add => inflight.buffer = Alu::execute(AluOp::Add, rv1, rv2),
        Opcode::Sub => inflight.buffer = Alu::execute(AluOp::Sub, rv1, rv2),
        Opcode::Mul => inflight.buffer = Alu::execute(AluOp::Mul, rv1, rv2),
        Opcode::And => inflight.buffer = Alu::execute(AluOp::And, rv1, rv2),
        Opcode::Or => inflight.buffer = Alu::execute(AluOp::Or, rv1, rv2),
        Opcode::ExOr => inflight.buffer = Alu::execute(AluOp::Xor, rv1, rv2),
        Opcode::Load => inflight.mem_address = rv1.wrapping_add(inflight.inst.imm),
        Opcode::Ldr => inflight.mem_address = rv1.wrapping_add(rv2),
        Opcode::Store => inflight.mem_address = rv2.wrapping_add(inflight.inst.imm),
        Opcode::Str => inflight.mem_address = rv2.wrapping_add(rv3),
        Opcode::Bz => {
            if inflight.cond == 0 {
                let target = inflight.pc.wrapping_add_signed(inflight.inst.imm);
                take_transfer(cpu, &mut inflight, target);
            }
        }
        Opcode::Bnz => {
            if inflight.cond != 0 {
                let target = inflight.pc.wrapping_add_signed(inflight.inst.imm);
                take_transfer(cpu, &mut inflight, target);
            }
        }
        Opcode::Jump => {
            let target = rv1.wrapping_add(inflight.inst.imm) as u32;
            take_transfer(cpu, &mut inflight, target);
        }
        // The machine stops only when HALT reaches Writeback.
        Opcode::Halt => {}
    }

    // Publish the completed result for Decode/RF bypass. Load results do
    // not exist yet; Memory2 publishes those.
    if let Some(rd) = inflight.inst.rd {
        if !inflight.inst.opcode.is_load() {
            cpu.forwards.publish(rd, inflight.buffer);
        }
    }

    cpu.latches.memory1 = Latch::Valid(inflight);
}

/// Resolves a taken control transfer: records the target, asserts the
/// fetch redirect, and squashes the three instructions behind the branch.
fn take_transfer(cpu: &mut Cpu, inflight: &mut InFlight, target: u32) {
    inflight.buffer = target as i32;
    cpu.redirect = Some(target);
    cpu.latches.fetch.squash();
    cpu.latches.decode.squash();
    cpu.latches.execute1.squash();
    cpu.stats.redirects += 1;
}
