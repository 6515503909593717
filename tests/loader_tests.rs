//! Tests for the program loader.

use apex_sim::common::LoaderError;
use apex_sim::isa::{Instruction, Opcode};
use apex_sim::sim::loader::parse_program;

/// Parses a representative program using comma separators.
#[test]
fn test_parse_basic_program() {
    let program = parse_program("MOVC,R1,#10\nADD,R3,R1,R2\nSTORE,R1,R2,#4\nBZ,#8\nHALT\n")
        .expect("program should parse");
    assert_eq!(program.len(), 5);
    assert_eq!(
        program[0],
        Instruction {
            opcode: Opcode::Movc,
            rd: Some(1),
            rs1: None,
            rs2: None,
            rs3: None,
            imm: 10,
        }
    );
    assert_eq!(
        program[1],
        Instruction {
            opcode: Opcode::Add,
            rd: Some(3),
            rs1: Some(1),
            rs2: Some(2),
            rs3: None,
            imm: 0,
        }
    );
    assert_eq!(
        program[2],
        Instruction {
            opcode: Opcode::Store,
            rd: None,
            rs1: Some(1),
            rs2: Some(2),
            rs3: None,
            imm: 4,
        }
    );
    assert_eq!(program[3].opcode, Opcode::Bz);
    assert_eq!(program[3].imm, 8);
    assert_eq!(program[4].opcode, Opcode::Halt);
}

/// Whitespace separators, mixed case, and comment/blank lines all parse.
#[test]
fn test_parse_flexible_syntax() {
    let text = "; constants\n\n  movc r1 #-7\nEX-OR,R2,R1,R1\nstr R1, R2, R3\nhalt";
    let program = parse_program(text).expect("program should parse");
    assert_eq!(program.len(), 4);
    assert_eq!(program[0].imm, -7);
    assert_eq!(program[1].opcode, Opcode::ExOr);
    assert_eq!(
        program[2],
        Instruction {
            opcode: Opcode::Str,
            rd: None,
            rs1: Some(1),
            rs2: Some(2),
            rs3: Some(3),
            imm: 0,
        }
    );
}

/// An unknown mnemonic is rejected with its line number.
#[test]
fn test_unknown_opcode() {
    match parse_program("MOVC,R1,#1\nFROB,R2,R3") {
        Err(LoaderError::UnknownOpcode { line: 2, token }) => assert_eq!(token, "FROB"),
        other => panic!("expected UnknownOpcode, got {other:?}"),
    }
}

/// A register token without the R prefix is a malformed operand.
#[test]
fn test_bad_operand() {
    match parse_program("MOVC,7,#1") {
        Err(LoaderError::BadOperand { line: 1, token }) => assert_eq!(token, "7"),
        other => panic!("expected BadOperand, got {other:?}"),
    }
}

/// A literal where a register belongs is a malformed operand.
#[test]
fn test_operand_kind_mismatch() {
    assert!(matches!(
        parse_program("ADD,R1,#2,R3"),
        Err(LoaderError::BadOperand { line: 1, .. })
    ));
}

/// Too few operands for the opcode.
#[test]
fn test_operand_count() {
    match parse_program("ADD,R1,R2") {
        Err(LoaderError::OperandCount {
            line: 1,
            expected: 3,
            found: 2,
            ..
        }) => {}
        other => panic!("expected OperandCount, got {other:?}"),
    }
}

/// Register indices outside 0..16 are rejected.
#[test]
fn test_register_out_of_range() {
    match parse_program("MOVC,R16,#1") {
        Err(LoaderError::RegisterOutOfRange { line: 1, index }) => assert_eq!(index, 16),
        other => panic!("expected RegisterOutOfRange, got {other:?}"),
    }
}

/// A file with no instructions at all is rejected.
#[test]
fn test_empty_program() {
    assert!(matches!(
        parse_program("; nothing here\n\n"),
        Err(LoaderError::EmptyProgram)
    ));
}
