//! Structured per-cycle trace events.
//!
//! Every tick the engine records, for each stage in the order the stages
//! ran, either an empty marker or the in-flight instruction with its code
//! index and PC. Formatting is the printer's job; the engine only emits
//! these records.

use crate::isa::Instruction;

/// A pipeline stage name, for trace records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Instruction fetch.
    Fetch,
    /// Decode and register-file read.
    DecodeRf,
    /// First execute cycle (buffer stage).
    Execute1,
    /// Second execute cycle (ALU, branch resolve).
    Execute2,
    /// First memory cycle (buffer stage).
    Memory1,
    /// Second memory cycle (data access).
    Memory2,
    /// Register commit and retirement.
    Writeback,
}

impl Stage {
    /// Human-readable stage name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::DecodeRf => "Decode/RF",
            Self::Execute1 => "Execute1",
            Self::Execute2 => "Execute2",
            Self::Memory1 => "Memory1",
            Self::Memory2 => "Memory2",
            Self::Writeback => "Writeback",
        }
    }
}

/// The instruction occupying a stage this cycle.
#[derive(Clone, Copy, Debug)]
pub struct InstrView {
    /// Code-memory index, `(pc - base) / 4`.
    pub index: usize,
    /// PC at which the instruction was fetched.
    pub pc: u32,
    /// The instruction record, for disassembly.
    pub inst: Instruction,
}

/// One stage's slot in a cycle: occupied or empty.
#[derive(Clone, Copy, Debug)]
pub struct StageEvent {
    /// Which stage this record describes.
    pub stage: Stage,
    /// The occupying instruction, or `None` for an empty stage.
    pub slot: Option<InstrView>,
}

/// All stage events of one clock cycle, in stage execution order.
#[derive(Clone, Debug)]
pub struct CycleTrace {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Stage records in the order the stages ran (Writeback first).
    pub stages: Vec<StageEvent>,
}

impl CycleTrace {
    /// Starts an empty trace for `cycle`.
    pub fn new(cycle: u64) -> Self {
        Self {
            cycle,
            stages: Vec::with_capacity(7),
        }
    }

    /// Records one stage's slot.
    pub fn record(&mut self, stage: Stage, slot: Option<InstrView>) {
        self.stages.push(StageEvent { stage, slot });
    }
}
