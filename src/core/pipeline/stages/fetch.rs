//! Fetch Stage.
//!
//! Reads the next instruction from code memory, maintains the PC, and
//! hands fetched instructions to Decode/RF. Fetch also consumes branch
//! redirects (steering the PC at the resolved target) and freezes once a
//! HALT has entered the pipeline.

use super::view;
use crate::core::pipeline::latches::{InFlight, Latch};
use crate::core::trace::{CycleTrace, Stage};
use crate::core::Cpu;
use crate::isa::INST_BYTES;

/// Executes one cycle of the Fetch stage.
///
/// Contract, in order:
/// 1. A halted machine does nothing.
/// 2. A squashed hold (wrong-path instruction caught by a branch flush or
///    a HALT freeze) is dropped.
/// 3. A pending redirect overwrites the PC with the branch target; the
///    fetch issued alongside the resolving branch read the wrong path, so
///    no instruction is produced this cycle.
/// 4. While `halting`, no new instruction is fetched.
/// 5. A held instruction moves on as soon as Decode/RF drains; no new
///    fetch is issued in the handoff cycle.
/// 6. Otherwise the instruction at the PC is fetched, the PC advances by
///    one word, and the instruction transfers to Decode/RF, or is held
///    here when Decode/RF is still stalled.
pub fn tick(cpu: &mut Cpu, trace: &mut CycleTrace) {
    if cpu.halted {
        trace.record(Stage::Fetch, None);
        return;
    }

    if cpu.latches.fetch.take_squashed().is_some() {
        cpu.stats.squashed += 1;
    }

    if let Some(target) = cpu.redirect.take() {
        cpu.pc = target;
        trace.record(Stage::Fetch, None);
        return;
    }

    if cpu.halting {
        trace.record(Stage::Fetch, None);
        return;
    }

    if let Latch::Stalled(held) = cpu.latches.fetch {
        trace.record(Stage::Fetch, Some(view(cpu, &held)));
        if cpu.latches.decode.is_empty() {
            cpu.latches.decode = Latch::Valid(held);
            cpu.latches.fetch = Latch::Empty;
        }
        return;
    }

    let Some(inst) = cpu.code.fetch(cpu.pc) else {
        // Ran past the end of the program; the pipeline drains.
        trace.record(Stage::Fetch, None);
        return;
    };

    let inflight = InFlight::new(inst, cpu.pc);
    trace.record(Stage::Fetch, Some(view(cpu, &inflight)));
    cpu.pc += INST_BYTES;

    if cpu.latches.decode.is_empty() {
        cpu.latches.decode = Latch::Valid(inflight);
    } else {
        cpu.latches.fetch = Latch::Stalled(inflight);
        cpu.stats.stalls_structural += 1;
    }
}
