//! Memory Stages.
//!
//! Memory is split across two cycles. Memory1 is a pure pipeline register
//! (same shape as Execute1: honor a squash, else transfer). Memory2
//! performs the data access: stores write the captured rs1 value to the
//! address Execute2 computed, loads read into the result buffer and
//! publish it for forwarding. An out-of-range address faults the run.

use super::{release_issued, view};
use crate::common::EngineFault;
use crate::core::pipeline::latches::Latch;
use crate::core::trace::{CycleTrace, Stage};
use crate::core::Cpu;

/// Executes one cycle of Memory1.
pub fn tick_memory1(cpu: &mut Cpu, trace: &mut CycleTrace) {
    if let Some(dropped) = cpu.latches.memory1.take_squashed() {
        release_issued(cpu, &dropped);
        trace.record(Stage::Memory1, None);
        return;
    }

    match cpu.latches.memory1.take_ready() {
        Some(inflight) => {
            trace.record(Stage::Memory1, Some(view(cpu, &inflight)));
            cpu.latches.memory2 = Latch::Valid(inflight);
        }
        None => trace.record(Stage::Memory1, None),
    }
}

/// Executes one cycle of Memory2.
pub fn tick_memory2(cpu: &mut Cpu, trace: &mut CycleTrace) -> Result<(), EngineFault> {
    let Some(mut inflight) = cpu.latches.memory2.take_ready() else {
        trace.record(Stage::Memory2, None);
        return Ok(());
    };
    trace.record(Stage::Memory2, Some(view(cpu, &inflight)));

    let opcode = inflight.inst.opcode;
    if opcode.is_store() {
        if !cpu.data_memory.write(inflight.mem_address, inflight.operands[0]) {
            return Err(EngineFault::DataAddressOutOfRange {
                pc: inflight.pc,
                address: inflight.mem_address,
            });
        }
    } else if opcode.is_load() {
        let value = cpu.data_memory.read(inflight.mem_address).ok_or(
            EngineFault::DataAddressOutOfRange {
                pc: inflight.pc,
                address: inflight.mem_address,
            },
        )?;
        inflight.buffer = value;
        if let Some(rd) = inflight.inst.rd {
            cpu.forwards.publish(rd, value);
        }
    }

    cpu.latches.write_back = Latch::Valid(inflight);
    Ok(())
}
