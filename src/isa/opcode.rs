//! The APEX opcode set.
//!
//! Opcodes are an exhaustive enum so that stage dispatch is type-checked:
//! adding an instruction forces every `match` in the pipeline to be
//! revisited. Classification helpers (writer/load/store/branch) drive the
//! hazard logic and the writeback commit, and [`OperandShape`] tells the
//! loader how to map operand tokens onto the instruction record.

use std::fmt;

/// An APEX opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Move constant: `MOVC rd,#imm`.
    Movc,
    /// Addition: `ADD rd,rs1,rs2`.
    Add,
    /// Subtraction: `SUB rd,rs1,rs2`.
    Sub,
    /// Multiplication (full product): `MUL rd,rs1,rs2`.
    Mul,
    /// Bitwise AND: `AND rd,rs1,rs2`.
    And,
    /// Bitwise OR: `OR rd,rs1,rs2`.
    Or,
    /// Bitwise exclusive OR: `EX-OR rd,rs1,rs2`.
    ExOr,
    /// Load with literal offset: `LOAD rd,rs1,#imm`, address `rs1 + imm`.
    Load,
    /// Load with register offset: `LDR rd,rs1,rs2`, address `rs1 + rs2`.
    Ldr,
    /// Store with literal offset: `STORE rs1,rs2,#imm`, stores `rs1` at
    /// `rs2 + imm`.
    Store,
    /// Store with register offset: `STR rs1,rs2,rs3`, stores `rs1` at
    /// `rs2 + rs3`.
    Str,
    /// Branch if zero: `BZ #imm`, PC-relative. The condition is the
    /// destination register of the preceding instruction.
    Bz,
    /// Branch if not zero: `BNZ #imm`, PC-relative.
    Bnz,
    /// Unconditional jump: `JUMP rs1,#imm`, absolute target `rs1 + imm`.
    Jump,
    /// Stop the machine once this instruction retires.
    Halt,
}

/// Operand syntax of an opcode, used by the loader to map tokens onto the
/// instruction record fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandShape {
    /// `rd, #imm` (MOVC).
    DstImm,
    /// `rd, rs1, rs2` (ALU ops, LDR).
    DstSrcSrc,
    /// `rd, rs1, #imm` (LOAD).
    DstSrcImm,
    /// `rs1, rs2, #imm` (STORE).
    SrcSrcImm,
    /// `rs1, rs2, rs3` (STR).
    SrcSrcSrc,
    /// `rs1, #imm` (JUMP).
    SrcImm,
    /// `#imm` (BZ, BNZ).
    Imm,
    /// No operands (HALT).
    None,
}

impl OperandShape {
    /// Number of operand tokens this shape expects.
    pub fn arity(self) -> usize {
        match self {
            Self::DstImm | Self::SrcImm => 2,
            Self::DstSrcSrc | Self::DstSrcImm | Self::SrcSrcImm | Self::SrcSrcSrc => 3,
            Self::Imm => 1,
            Self::None => 0,
        }
    }
}

impl Opcode {
    /// Parses a mnemonic as it appears in a program file.
    pub fn from_mnemonic(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "MOVC" => Some(Self::Movc),
            "ADD" => Some(Self::Add),
            "SUB" => Some(Self::Sub),
            "MUL" => Some(Self::Mul),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "EX-OR" | "EXOR" => Some(Self::ExOr),
            "LOAD" => Some(Self::Load),
            "LDR" => Some(Self::Ldr),
            "STORE" => Some(Self::Store),
            "STR" => Some(Self::Str),
            "BZ" => Some(Self::Bz),
            "BNZ" => Some(Self::Bnz),
            "JUMP" => Some(Self::Jump),
            "HALT" => Some(Self::Halt),
            _ => None,
        }
    }

    /// Canonical mnemonic for disassembly.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Movc => "MOVC",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::ExOr => "EX-OR",
            Self::Load => "LOAD",
            Self::Ldr => "LDR",
            Self::Store => "STORE",
            Self::Str => "STR",
            Self::Bz => "BZ",
            Self::Bnz => "BNZ",
            Self::Jump => "JUMP",
            Self::Halt => "HALT",
        }
    }

    /// Operand syntax of this opcode.
    pub fn shape(self) -> OperandShape {
        match self {
            Self::Movc => OperandShape::DstImm,
            Self::Add | Self::Sub | Self::Mul | Self::And | Self::Or | Self::ExOr | Self::Ldr => {
                OperandShape::DstSrcSrc
            }
            Self::Load => OperandShape::DstSrcImm,
            Self::Store => OperandShape::SrcSrcImm,
            Self::Str => OperandShape::SrcSrcSrc,
            Self::Jump => OperandShape::SrcImm,
            Self::Bz | Self::Bnz => OperandShape::Imm,
            Self::Halt => OperandShape::None,
        }
    }

    /// Whether this opcode commits a destination register at Writeback.
    pub fn writes_register(self) -> bool {
        matches!(
            self,
            Self::Movc
                | Self::Add
                | Self::Sub
                | Self::Mul
                | Self::And
                | Self::Or
                | Self::ExOr
                | Self::Load
                | Self::Ldr
        )
    }

    /// Whether this opcode reads data memory at Memory2.
    pub fn is_load(self) -> bool {
        matches!(self, Self::Load | Self::Ldr)
    }

    /// Whether this opcode writes data memory at Memory2.
    pub fn is_store(self) -> bool {
        matches!(self, Self::Store | Self::Str)
    }

    /// Whether this opcode is a conditional branch (condition drawn from
    /// the preceding instruction's destination register).
    pub fn is_branch(self) -> bool {
        matches!(self, Self::Bz | Self::Bnz)
    }

    /// Whether this opcode can redirect the PC at Execute2.
    pub fn is_control(self) -> bool {
        matches!(self, Self::Bz | Self::Bnz | Self::Jump)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
