//! APEX Instruction Set Architecture definitions.
//!
//! The APEX ISA is a small word-oriented teaching ISA: sixteen integer
//! registers, 4-byte instructions based at address 4000, and fifteen
//! opcodes covering register moves, ALU operations, loads/stores, and
//! PC-relative or register-indirect control transfers.

/// The instruction record produced by the loader.
pub mod instruction;

/// The opcode set and its per-opcode classification.
pub mod opcode;

pub use instruction::Instruction;
pub use opcode::{Opcode, OperandShape};

/// Number of architectural registers.
pub const ARCH_REGS: usize = 16;

/// Base byte address of code memory; instruction `i` lives at
/// `CODE_BASE + 4 * i`.
pub const CODE_BASE: u32 = 4000;

/// Size of one instruction in bytes.
pub const INST_BYTES: u32 = 4;
