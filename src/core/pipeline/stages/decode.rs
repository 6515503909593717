//! Decode/RF Stage: the hazard core.
//!
//! Decode/RF classifies the instruction's read and write sets, gathers
//! source operands from the register file (or, in forwarding mode, from
//! published in-flight results), and issues the instruction into Execute1
//! once everything is obtainable. Anything missing holds the instruction
//! here, which in turn stalls Fetch behind it.
//!
//! Issue-time bookkeeping maintains the machine's one-writer discipline: a
//! writer marks its destination register invalid and allocates the
//! pending-write entry the moment it crosses into Execute1, and a writer
//! whose destination is still invalid (an older writer is in flight) waits
//! its turn.

use super::view;
use crate::common::EngineFault;
use crate::core::pipeline::hazards::{self, OperandSource};
use crate::core::pipeline::latches::{InFlight, Latch};
use crate::core::trace::{CycleTrace, Stage};
use crate::core::Cpu;
use crate::isa::Opcode;

/// Executes one cycle of the Decode/RF stage.
pub fn tick(cpu: &mut Cpu, trace: &mut CycleTrace) -> Result<(), EngineFault> {
    if let Some(dropped) = cpu.latches.decode.take_squashed() {
        if dropped.inst.opcode == Opcode::Halt {
            // The freeze was armed by this HALT; lift it for the
            // redirected path.
            cpu.halting = false;
        }
        cpu.stats.squashed += 1;
        trace.record(Stage::DecodeRf, None);
        return Ok(());
    }

    let Some(mut inflight) = cpu.latches.decode.take_ready() else {
        trace.record(Stage::DecodeRf, None);
        return Ok(());
    };
    trace.record(Stage::DecodeRf, Some(view(cpu, &inflight)));

    // HALT arms the fetch freeze the moment it reaches Decode/RF, and
    // nothing behind it may enter the pipe.
    if inflight.inst.opcode == Opcode::Halt {
        cpu.halting = true;
        cpu.latches.fetch.squash();
    }

    let mut blocked = false;

    for (slot, reg) in inflight.inst.sources().into_iter().enumerate() {
        let Some(reg) = reg else { continue };
        if inflight.captured[slot] {
            continue;
        }
        match hazards::acquire_operand(&cpu.regs, &cpu.forwards, cpu.mode, reg) {
            Some((value, source)) => {
                inflight.operands[slot] = value;
                inflight.captured[slot] = true;
                if source == OperandSource::Forwarded {
                    cpu.stats.operands_forwarded += 1;
                }
            }
            None => blocked = true,
        }
    }

    if inflight.inst.opcode.is_branch() && !inflight.cond_captured {
        let cond_reg = condition_register(cpu, &inflight)?;
        match hazards::acquire_operand(&cpu.regs, &cpu.forwards, cpu.mode, cond_reg) {
            Some((value, source)) => {
                inflight.cond = value;
                inflight.cond_captured = true;
                cpu.forwarded = source == OperandSource::Forwarded;
                if cpu.forwarded {
                    cpu.stats.operands_forwarded += 1;
                }
            }
            None => blocked = true,
        }
    }

    // Write-after-write: wait for the in-flight older writer of rd.
    if let Some(rd) = inflight.inst.rd {
        if !cpu.regs.is_valid(rd) {
            blocked = true;
        }
    }

    if blocked {
        cpu.latches.decode = Latch::Stalled(inflight);
        cpu.stats.stalls_data += 1;
        return Ok(());
    }

    // Even with operands in hand the handoff needs a free Execute1 latch.
    if !cpu.latches.execute1.is_empty() {
        cpu.latches.decode = Latch::Stalled(inflight);
        cpu.stats.stalls_structural += 1;
        return Ok(());
    }

    if let Some(rd) = inflight.inst.rd {
        cpu.regs.invalidate(rd);
        cpu.forwards.allocate(rd);
    }
    cpu.latches.execute1 = Latch::Valid(inflight);
    Ok(())
}

/// Resolves the condition register of a BZ/BNZ: the destination of the
/// instruction immediately preceding the branch in program order.
///
/// A branch at the first code address, or one whose predecessor writes no
/// register, has no condition source and faults the run.
fn condition_register(cpu: &Cpu, inflight: &InFlight) -> Result<usize, EngineFault> {
    cpu.code
        .predecessor(inflight.pc)
        .and_then(|prev| prev.rd)
        .ok_or(EngineFault::BranchConditionUnavailable { pc: inflight.pc })
}
