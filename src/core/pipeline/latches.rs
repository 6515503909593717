//! Pipeline latch structures for inter-stage communication.
//!
//! One latch sits in front of every stage and carries the full working
//! record of the instruction that stage will consume. A latch is in one of
//! four states:
//!
//! * `Empty`: no instruction occupies it (a bubble).
//! * `Valid`: an instruction is ready for the stage to consume.
//! * `Stalled`: the owning stage could not hand the instruction off last
//!   cycle and will retry.
//! * `Squashed`: a branch resolution or HALT invalidated the occupant; the
//!   stage must drop it without side effects.
//!
//! The four states replace the overlapping busy/stalled/flushed flag
//! triple a hardware description would use, so that illegal combinations
//! cannot be represented.

use crate::isa::Instruction;

/// Working record of one in-flight instruction.
///
/// Created at Fetch and carried latch-to-latch until Writeback. Decode/RF
/// fills in captured operands; Execute2 fills the result buffer or memory
/// address; Memory2 overwrites the buffer for loads.
#[derive(Clone, Copy, Debug)]
pub struct InFlight {
    /// The instruction record, never mutated.
    pub inst: Instruction,
    /// PC at which the instruction was fetched.
    pub pc: u32,
    /// Captured source-operand values, positionally rs1/rs2/rs3.
    pub operands: [i32; 3],
    /// Which operands have been captured so far. A stalled instruction's
    /// retries only acquire the ones still missing.
    pub captured: [bool; 3],
    /// Captured branch-condition value (BZ/BNZ only).
    pub cond: i32,
    /// Whether the branch condition has been captured.
    pub cond_captured: bool,
    /// Result buffer: ALU result, MOVC literal, load data, or branch
    /// target.
    pub buffer: i32,
    /// Data-memory address computed by Execute2 for loads and stores.
    pub mem_address: i32,
}

impl InFlight {
    /// Starts a fresh record for an instruction fetched at `pc`.
    pub fn new(inst: Instruction, pc: u32) -> Self {
        Self {
            inst,
            pc,
            operands: [0; 3],
            captured: [false; 3],
            cond: 0,
            cond_captured: false,
            buffer: 0,
            mem_address: 0,
        }
    }
}

/// One inter-stage latch.
#[derive(Clone, Copy, Debug, Default)]
pub enum Latch {
    /// No occupant.
    #[default]
    Empty,
    /// An instruction ready to be consumed.
    Valid(InFlight),
    /// An instruction held back by its stage, to be retried.
    Stalled(InFlight),
    /// An invalidated occupant, to be dropped without side effects.
    Squashed(InFlight),
}

impl Latch {
    /// Whether the latch holds nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The occupant, regardless of state.
    pub fn occupant(&self) -> Option<&InFlight> {
        match self {
            Self::Empty => None,
            Self::Valid(x) | Self::Stalled(x) | Self::Squashed(x) => Some(x),
        }
    }

    /// Invalidates the occupant, if any. An empty latch stays empty.
    pub fn squash(&mut self) {
        if let Self::Valid(x) | Self::Stalled(x) = *self {
            *self = Self::Squashed(x);
        }
    }

    /// Removes and returns a squashed occupant.
    pub fn take_squashed(&mut self) -> Option<InFlight> {
        match *self {
            Self::Squashed(x) => {
                *self = Self::Empty;
                Some(x)
            }
            _ => None,
        }
    }

    /// Removes and returns the occupant ready for processing (valid or
    /// retried-after-stall).
    pub fn take_ready(&mut self) -> Option<InFlight> {
        match *self {
            Self::Valid(x) | Self::Stalled(x) => {
                *self = Self::Empty;
                Some(x)
            }
            _ => None,
        }
    }

    /// Whether the occupant is held back by a stall.
    pub fn is_stalled(&self) -> bool {
        matches!(self, Self::Stalled(_))
    }
}

/// The seven latches of the datapath, named after the stage that consumes
/// each one. `fetch` doubles as the Fetch stage's hold slot while Decode/RF
/// is stalled.
#[derive(Clone, Debug, Default)]
pub struct Latches {
    /// Fetch's working latch (Fetch → Decode/RF boundary).
    pub fetch: Latch,
    /// Input to Decode/RF.
    pub decode: Latch,
    /// Input to Execute1.
    pub execute1: Latch,
    /// Input to Execute2.
    pub execute2: Latch,
    /// Input to Memory1.
    pub memory1: Latch,
    /// Input to Memory2.
    pub memory2: Latch,
    /// Input to Writeback.
    pub write_back: Latch,
}
