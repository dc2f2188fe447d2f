//! Instruction set definitions.
//!
//! This module defines the opcode set, the decoded instruction record the
//! engine consumes, and the routing from opcodes to reservation-station and
//! execution-unit classes.

/// Decoded instruction record and operand shapes.
pub mod instruction;

/// Opcode set and functional-class routing.
pub mod opcode;

pub use instruction::{Instruction, OperandSpec};
pub use opcode::{FuncClass, Opcode, UnitClass};
