//! Assembly program loader.
//!
//! Parses the textual assembly format of the modeled machine into decoded
//! [`Instruction`] records:
//!
//! ```text
//! LOOP:   LWS  F2 0(R1)
//!         MULTS F4 F2 F0
//!         SWS  F4 0(R1)
//!         SUBI R1 R1 4
//!         BNEZ R1 LOOP
//!         EOP
//! ```
//!
//! Commas between operands and `#` comments are tolerated. Branch labels are
//! resolved to word-aligned relative offsets, `(target − index − 1) × 4`, so
//! the taken target is `pc + 4 + offset`. An unknown opcode is reported as a
//! warning and the remainder of the load continues; structural problems
//! (malformed operands, undefined labels) abort the load.

use crate::common::error::LoadError;
use crate::isa::{Instruction, Opcode};
use std::collections::HashMap;
use tracing::warn;

/// Loads and parses the assembly program in `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise any error
/// of [`parse_program`].
pub fn load_file(path: &str) -> Result<Vec<Instruction>, LoadError> {
    let src = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_program(&src)
}

/// Parses an assembly program from text.
///
/// # Errors
///
/// Returns a [`LoadError`] for malformed operands, missing operands, or
/// branches naming a label no line defines. Unknown opcodes are skipped with
/// a warning instead.
pub fn parse_program(src: &str) -> Result<Vec<Instruction>, LoadError> {
    let mut program = Vec::new();
    let mut labels: HashMap<String, usize> = HashMap::new();
    let mut fixups: Vec<(usize, String, usize)> = Vec::new();

    for (line_no, raw) in src.lines().enumerate() {
        let line = line_no + 1;
        let code = raw.split('#').next().unwrap_or("");
        let normalized = code.replace(',', " ");
        let mut tokens = normalized.split_whitespace();
        let Some(mut first) = tokens.next() else {
            continue;
        };

        if let Some(label) = first.strip_suffix(':') {
            labels.insert(label.to_string(), program.len());
            match tokens.next() {
                Some(tok) => first = tok,
                None => continue,
            }
        }

        let Ok(opcode) = first.to_ascii_uppercase().parse::<Opcode>() else {
            warn!("line {line}: unknown opcode `{first}`, skipping");
            continue;
        };

        let mut next = |what: &str| {
            tokens.next().ok_or_else(|| LoadError::MissingOperand {
                line,
                what: what.to_string(),
            })
        };

        let instr = match opcode {
            Opcode::Add
            | Opcode::Sub
            | Opcode::Xor
            | Opcode::And
            | Opcode::Mult
            | Opcode::Div
            | Opcode::Adds
            | Opcode::Subs
            | Opcode::Mults
            | Opcode::Divs => {
                let dest = parse_reg(next("destination")?, line)?;
                let src1 = parse_reg(next("source 1")?, line)?;
                let src2 = parse_reg(next("source 2")?, line)?;
                Instruction::new(opcode, Some(src1), Some(src2), Some(dest), 0)
            }
            Opcode::Addi | Opcode::Subi => {
                let dest = parse_reg(next("destination")?, line)?;
                let src1 = parse_reg(next("source")?, line)?;
                let imm = parse_imm(next("immediate")?, line)?;
                Instruction::new(opcode, Some(src1), None, Some(dest), imm)
            }
            Opcode::Lw | Opcode::Lws => {
                let dest = parse_reg(next("destination")?, line)?;
                let (imm, base) = parse_mem(next("address")?, line)?;
                Instruction::new(opcode, Some(base), None, Some(dest), imm)
            }
            Opcode::Sw | Opcode::Sws => {
                let data = parse_reg(next("source")?, line)?;
                let (imm, base) = parse_mem(next("address")?, line)?;
                Instruction::new(opcode, Some(data), Some(base), None, imm)
            }
            Opcode::Beqz
            | Opcode::Bnez
            | Opcode::Bltz
            | Opcode::Bgtz
            | Opcode::Blez
            | Opcode::Bgez => {
                let src1 = parse_reg(next("source")?, line)?;
                fixups.push((program.len(), next("label")?.to_string(), line));
                Instruction::new(opcode, Some(src1), None, None, 0)
            }
            Opcode::Jump => {
                fixups.push((program.len(), next("label")?.to_string(), line));
                Instruction::new(opcode, None, None, None, 0)
            }
            Opcode::Eop => Instruction::new(opcode, None, None, None, 0),
        };
        program.push(instr);
    }

    for (index, label, line) in fixups {
        let Some(&target) = labels.get(&label) else {
            return Err(LoadError::UndefinedLabel { line, label });
        };
        let offset = (target as i64 - index as i64 - 1) * 4;
        program[index].imm = offset as u32;
    }

    Ok(program)
}

/// Parses a register token (`R7` or `F3`, either case).
fn parse_reg(token: &str, line: usize) -> Result<usize, LoadError> {
    let malformed = || LoadError::MalformedOperand {
        line,
        token: token.to_string(),
    };
    let digits = token
        .strip_prefix(['R', 'F', 'r', 'f'])
        .ok_or_else(malformed)?;
    digits.parse().map_err(|_| malformed())
}

/// Parses an immediate token: decimal (optionally negative) or `0x` hex.
fn parse_imm(token: &str, line: usize) -> Result<u32, LoadError> {
    let malformed = || LoadError::MalformedOperand {
        line,
        token: token.to_string(),
    };
    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let value = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).map_err(|_| malformed())?,
        None => body.parse::<i64>().map_err(|_| malformed())?,
    };
    Ok(if negative { -value } else { value } as u32)
}

/// Parses a memory operand `imm(Rbase)`.
fn parse_mem(token: &str, line: usize) -> Result<(u32, usize), LoadError> {
    let malformed = || LoadError::MalformedOperand {
        line,
        token: token.to_string(),
    };
    let (offset, rest) = token.split_once('(').ok_or_else(malformed)?;
    let base = rest.strip_suffix(')').ok_or_else(malformed)?;
    let imm = if offset.is_empty() {
        0
    } else {
        parse_imm(offset, line)?
    };
    Ok((imm, parse_reg(base, line)?))
}
