//! Arithmetic and branch resolution.
//!
//! Loads and stores are not handled here; the Write-Result stage reads data
//! memory directly.

use crate::common::constants::{INSTR_BYTES, UNDEFINED};
use crate::isa::Opcode;

/// Computes the result of a non-memory operation.
///
/// Integer arithmetic wraps on 32 bits; `DIV` is unsigned and yields the
/// uninitialized pattern on a zero divisor (unspecified input, not a modeled
/// error). FP ops treat the operands as `f32` bit patterns. Branches and
/// jumps resolve to the taken target `pc + 4 + imm` or the fall-through
/// `pc + 4`, compared as signed words against zero.
pub(crate) fn alu(opcode: Opcode, v1: u32, v2: u32, imm: u32, pc: u32) -> u32 {
    let fp = |f: fn(f32, f32) -> f32| f(f32::from_bits(v1), f32::from_bits(v2)).to_bits();
    let taken = pc.wrapping_add(INSTR_BYTES).wrapping_add(imm);
    let fallthrough = pc.wrapping_add(INSTR_BYTES);
    let branch = |cond: bool| if cond { taken } else { fallthrough };
    let signed = v1 as i32;

    match opcode {
        Opcode::Add | Opcode::Addi => v1.wrapping_add(v2),
        Opcode::Sub | Opcode::Subi => v1.wrapping_sub(v2),
        Opcode::Xor => v1 ^ v2,
        Opcode::And => v1 & v2,
        Opcode::Mult => v1.wrapping_mul(v2),
        Opcode::Div => v1.checked_div(v2).unwrap_or(UNDEFINED),
        Opcode::Adds => fp(|a, b| a + b),
        Opcode::Subs => fp(|a, b| a - b),
        Opcode::Mults => fp(|a, b| a * b),
        Opcode::Divs => fp(|a, b| a / b),
        Opcode::Jump => taken,
        Opcode::Beqz => branch(signed == 0),
        Opcode::Bnez => branch(signed != 0),
        Opcode::Bltz => branch(signed < 0),
        Opcode::Bgtz => branch(signed > 0),
        Opcode::Blez => branch(signed <= 0),
        Opcode::Bgez => branch(signed >= 0),
        Opcode::Lw | Opcode::Sw | Opcode::Lws | Opcode::Sws | Opcode::Eop => UNDEFINED,
    }
}
