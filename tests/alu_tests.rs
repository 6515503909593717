//! Unit tests for ALU operations.

use apex_sim::core::units::{Alu, AluOp};

/// Tests addition, including wraparound at the word boundary.
#[test]
fn test_alu_add() {
    assert_eq!(Alu::execute(AluOp::Add, 10, 20), 30);
    assert_eq!(Alu::execute(AluOp::Add, -5, 3), -2);
    assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), i32::MIN);
}

/// Tests subtraction, including wraparound.
#[test]
fn test_alu_sub() {
    assert_eq!(Alu::execute(AluOp::Sub, 30, 10), 20);
    assert_eq!(Alu::execute(AluOp::Sub, 0, 1), -1);
    assert_eq!(Alu::execute(AluOp::Sub, i32::MIN, 1), i32::MAX);
}

/// Tests multiplication, including the truncated full product.
#[test]
fn test_alu_mul() {
    assert_eq!(Alu::execute(AluOp::Mul, 6, 7), 42);
    assert_eq!(Alu::execute(AluOp::Mul, -4, 5), -20);
    assert_eq!(Alu::execute(AluOp::Mul, 1 << 20, 1 << 20), 0);
}

/// Tests the bitwise operations.
#[test]
fn test_alu_bitwise() {
    assert_eq!(Alu::execute(AluOp::And, 0b1100, 0b1010), 0b1000);
    assert_eq!(Alu::execute(AluOp::Or, 0b1100, 0b1010), 0b1110);
    assert_eq!(Alu::execute(AluOp::Xor, 0b1100, 0b1010), 0b0110);
    assert_eq!(Alu::execute(AluOp::Xor, -1, 0), -1);
}
