//! APEX Architectural Register File.
//!
//! This module implements the sixteen-entry integer register file with
//! per-register validity bits. A register goes invalid the cycle Decode/RF
//! issues its writer into Execute1 and becomes valid again when that writer
//! commits at Writeback. Between those two points exactly one in-flight
//! writer exists per invalid register; Decode/RF enforces this by stalling
//! a writer whose destination is still invalid.

use crate::isa::ARCH_REGS;

#[derive(Clone, Copy, Debug)]
struct Register {
    value: i32,
    valid: bool,
}

/// Register file with validity scoreboard.
///
/// All registers start at zero and valid.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    regs: [Register; ARCH_REGS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a register file with every register zero and valid.
    pub fn new() -> Self {
        Self {
            regs: [Register {
                value: 0,
                valid: true,
            }; ARCH_REGS],
        }
    }

    /// Reads a register's architectural value.
    ///
    /// The value is meaningful to the pipeline only while the register is
    /// valid; callers in Decode/RF check [`Self::is_valid`] first.
    pub fn read(&self, idx: usize) -> i32 {
        self.regs[idx].value
    }

    /// Whether the register currently holds a committed value.
    pub fn is_valid(&self, idx: usize) -> bool {
        self.regs[idx].valid
    }

    /// Marks a register pending: its in-flight writer has been issued.
    pub fn invalidate(&mut self, idx: usize) {
        self.regs[idx].valid = false;
    }

    /// Restores validity without writing, used when the in-flight writer
    /// is squashed before it could commit.
    pub fn revalidate(&mut self, idx: usize) {
        self.regs[idx].valid = true;
    }

    /// Commits a writeback result and revalidates the register.
    pub fn commit(&mut self, idx: usize, value: i32) {
        self.regs[idx] = Register { value, valid: true };
    }

    /// Number of registers currently marked invalid.
    pub fn invalid_count(&self) -> usize {
        self.regs.iter().filter(|r| !r.valid).count()
    }

    /// Snapshot of `(value, valid)` pairs for dumping and tests.
    pub fn entries(&self) -> impl Iterator<Item = (i32, bool)> + '_ {
        self.regs.iter().map(|r| (r.value, r.valid))
    }
}
