//! APEX program loader.
//!
//! Parses assembly text into the instruction records the engine consumes.
//! One instruction per line; the mnemonic and its operands are separated
//! by commas and/or whitespace, registers are written `R<n>` and literals
//! `#<imm>` (e.g. `MOVC,R1,#10` or `STORE R1 R2 #4`). Blank lines and
//! lines starting with `;` are skipped. All validation happens here:
//! unknown mnemonics, malformed or miscounted operands, and out-of-range
//! register indices never reach the engine.

use std::fs;

use crate::common::LoaderError;
use crate::isa::{Instruction, Opcode, OperandShape, ARCH_REGS};

/// Loads and parses a program file.
pub fn load_program(path: &str) -> Result<Vec<Instruction>, LoaderError> {
    let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_program(&text)
}

/// Parses program text into instruction records.
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, LoaderError> {
    let mut program = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }
        program.push(parse_line(trimmed, line)?);
    }
    if program.is_empty() {
        return Err(LoaderError::EmptyProgram);
    }
    Ok(program)
}

fn parse_line(line: &str, line_no: usize) -> Result<Instruction, LoaderError> {
    let mut tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    let mnemonic = tokens.next().unwrap_or_default();
    let opcode =
        Opcode::from_mnemonic(mnemonic).ok_or_else(|| LoaderError::UnknownOpcode {
            line: line_no,
            token: mnemonic.to_string(),
        })?;

    let operands: Vec<&str> = tokens.collect();
    let shape = opcode.shape();
    if operands.len() != shape.arity() {
        return Err(LoaderError::OperandCount {
            line: line_no,
            opcode: opcode.mnemonic().to_string(),
            expected: shape.arity(),
            found: operands.len(),
        });
    }

    let reg = |slot: usize| parse_register(operands[slot], line_no);
    let imm = |slot: usize| parse_literal(operands[slot], line_no);

    let mut inst = Instruction {
        opcode,
        rd: None,
        rs1: None,
        rs2: None,
        rs3: None,
        imm: 0,
    };
    match shape {
        OperandShape::DstImm => {
            inst.rd = Some(reg(0)?);
            inst.imm = imm(1)?;
        }
        OperandShape::DstSrcSrc => {
            inst.rd = Some(reg(0)?);
            inst.rs1 = Some(reg(1)?);
            inst.rs2 = Some(reg(2)?);
        }
        OperandShape::DstSrcImm => {
            inst.rd = Some(reg(0)?);
            inst.rs1 = Some(reg(1)?);
            inst.imm = imm(2)?;
        }
        OperandShape::SrcSrcImm => {
            inst.rs1 = Some(reg(0)?);
            inst.rs2 = Some(reg(1)?);
            inst.imm = imm(2)?;
        }
        OperandShape::SrcSrcSrc => {
            inst.rs1 = Some(reg(0)?);
            inst.rs2 = Some(reg(1)?);
            inst.rs3 = Some(reg(2)?);
        }
        OperandShape::SrcImm => {
            inst.rs1 = Some(reg(0)?);
            inst.imm = imm(1)?;
        }
        OperandShape::Imm => {
            inst.imm = imm(0)?;
        }
        OperandShape::None => {}
    }
    Ok(inst)
}

fn parse_register(token: &str, line: usize) -> Result<usize, LoaderError> {
    let body = token
        .strip_prefix('R')
        .or_else(|| token.strip_prefix('r'))
        .ok_or_else(|| LoaderError::BadOperand {
            line,
            token: token.to_string(),
        })?;
    let index: i64 = body.parse().map_err(|_| LoaderError::BadOperand {
        line,
        token: token.to_string(),
    })?;
    if !(0..ARCH_REGS as i64).contains(&index) {
        return Err(LoaderError::RegisterOutOfRange { line, index });
    }
    Ok(index as usize)
}

fn parse_literal(token: &str, line: usize) -> Result<i32, LoaderError> {
    let body = token
        .strip_prefix('#')
        .ok_or_else(|| LoaderError::BadOperand {
            line,
            token: token.to_string(),
        })?;
    body.parse().map_err(|_| LoaderError::BadOperand {
        line,
        token: token.to_string(),
    })
}
