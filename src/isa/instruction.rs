//! The decoded instruction record.
//!
//! Records are produced by the loader and never mutated by the engine.
//! Absent register fields are `None`; the destination field is populated
//! only for opcodes that actually commit a register, so the hazard logic
//! can key off `rd` without consulting the opcode again.

use std::fmt;

use super::opcode::Opcode;

/// One loaded APEX instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// The operation.
    pub opcode: Opcode,
    /// Destination register, for register-writing opcodes.
    pub rd: Option<usize>,
    /// First source register.
    pub rs1: Option<usize>,
    /// Second source register.
    pub rs2: Option<usize>,
    /// Third source register (STR only).
    pub rs3: Option<usize>,
    /// Signed literal operand; 0 when the opcode takes none.
    pub imm: i32,
}

impl Instruction {
    /// The source registers this instruction reads, in operand order.
    ///
    /// The implicit branch-condition register of BZ/BNZ is not included;
    /// it belongs to the preceding instruction and is resolved by the
    /// Decode/RF stage.
    pub fn sources(&self) -> [Option<usize>; 3] {
        [self.rs1, self.rs2, self.rs3]
    }
}

impl fmt::Display for Instruction {
    /// Formats the instruction the way the trace stream disassembles it,
    /// e.g. `MOVC,R1,#10` or `STR,R1,R2,R3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode;
        let r = |reg: Option<usize>| reg.unwrap_or(0);
        match op {
            Opcode::Movc => write!(f, "{op},R{},#{}", r(self.rd), self.imm),
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::And | Opcode::Or | Opcode::ExOr => {
                write!(f, "{op},R{},R{},R{}", r(self.rd), r(self.rs1), r(self.rs2))
            }
            Opcode::Load => write!(f, "{op},R{},R{},#{}", r(self.rd), r(self.rs1), self.imm),
            Opcode::Ldr => write!(f, "{op},R{},R{},R{}", r(self.rd), r(self.rs1), r(self.rs2)),
            Opcode::Store => write!(f, "{op},R{},R{},#{}", r(self.rs1), r(self.rs2), self.imm),
            Opcode::Str => write!(f, "{op},R{},R{},R{}", r(self.rs1), r(self.rs2), r(self.rs3)),
            Opcode::Bz | Opcode::Bnz => write!(f, "{op},#{}", self.imm),
            Opcode::Jump => write!(f, "{op},R{},#{}", r(self.rs1), self.imm),
            Opcode::Halt => write!(f, "{op}"),
        }
    }
}
