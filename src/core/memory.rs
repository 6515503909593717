//! Code and data memories.
//!
//! Code memory is an immutable instruction array based at a configured
//! byte address (canonically [`crate::isa::CODE_BASE`]); the PC is a byte
//! address and instructions are 4 bytes wide. Data memory is a flat array
//! of words indexed directly by the address Execute2 computes; out-of-range
//! indices are reported to the caller, which raises an engine fault.

use crate::isa::{Instruction, INST_BYTES};

/// The loaded program.
#[derive(Clone, Debug)]
pub struct CodeMemory {
    base: u32,
    instructions: Vec<Instruction>,
}

impl CodeMemory {
    /// Wraps a loaded instruction list based at `base`.
    pub fn new(base: u32, instructions: Vec<Instruction>) -> Self {
        Self { base, instructions }
    }

    /// Base byte address of the first instruction.
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Number of loaded instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program is empty.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction index for a PC, usable only when `pc` is in range.
    pub fn index_of(&self, pc: u32) -> usize {
        ((pc - self.base) / INST_BYTES) as usize
    }

    /// The instruction at `pc`, or `None` when the PC is outside the
    /// program (the pipeline then drains instead of fetching).
    pub fn fetch(&self, pc: u32) -> Option<Instruction> {
        if pc < self.base || (pc - self.base) % INST_BYTES != 0 {
            return None;
        }
        self.instructions.get(self.index_of(pc)).copied()
    }

    /// The instruction immediately preceding `pc` in program order, which
    /// supplies the condition register for BZ/BNZ at `pc`.
    pub fn predecessor(&self, pc: u32) -> Option<Instruction> {
        if pc < self.base + INST_BYTES {
            return None;
        }
        self.fetch(pc - INST_BYTES)
    }

    /// All loaded instructions, in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

/// Word-addressed data memory.
#[derive(Clone, Debug)]
pub struct DataMemory {
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates a zero-filled memory of `words` words.
    pub fn new(words: usize) -> Self {
        Self {
            words: vec![0; words],
        }
    }

    /// Reads the word at `address`, or `None` when out of range.
    pub fn read(&self, address: i32) -> Option<i32> {
        usize::try_from(address)
            .ok()
            .and_then(|idx| self.words.get(idx))
            .copied()
    }

    /// Writes the word at `address`; `false` when out of range.
    pub fn write(&mut self, address: i32, value: i32) -> bool {
        match usize::try_from(address)
            .ok()
            .and_then(|idx| self.words.get_mut(idx))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// The backing words, for dumps and tests.
    pub fn words(&self) -> &[i32] {
        &self.words
    }
}
