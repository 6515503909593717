//! Execution units.

/// Integer arithmetic logic unit.
pub mod alu;

pub use alu::{Alu, AluOp};
