//! Opcode set and functional-class routing.
//!
//! The opcode set is the modeled machine's: integer ALU ops (register and
//! immediate forms), integer and FP multiply/divide, single-precision FP
//! add/sub, word loads and stores in integer and FP flavors, compare-to-zero
//! conditional branches, an unconditional jump, and the `EOP` end-of-program
//! marker.
//!
//! Two orthogonal classifications drive dispatch:
//! - [`FuncClass`] partitions the reservation-station pool,
//! - [`UnitClass`] partitions the execution-unit pool.
//!
//! They differ: integer multiply shares the multiplier unit with `MULTS`,
//! but waits in an Integer station, not an FP-Mult one.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Instruction opcodes understood by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    /// Integer word load: `LW Rd imm(Rbase)`.
    Lw,
    /// Integer word store: `SW Rsrc imm(Rbase)`.
    Sw,
    /// Integer add: `ADD Rd Rs Rt`.
    Add,
    /// Integer add immediate: `ADDI Rd Rs imm`.
    Addi,
    /// Integer subtract: `SUB Rd Rs Rt`.
    Sub,
    /// Integer subtract immediate: `SUBI Rd Rs imm`.
    Subi,
    /// Bitwise exclusive or: `XOR Rd Rs Rt`.
    Xor,
    /// Bitwise and: `AND Rd Rs Rt`.
    And,
    /// Integer multiply: `MULT Rd Rs Rt`.
    Mult,
    /// Integer divide (unsigned): `DIV Rd Rs Rt`.
    Div,
    /// Branch if equal to zero: `BEQZ Rs label`.
    Beqz,
    /// Branch if not equal to zero: `BNEZ Rs label`.
    Bnez,
    /// Branch if less than zero (signed): `BLTZ Rs label`.
    Bltz,
    /// Branch if greater than zero (signed): `BGTZ Rs label`.
    Bgtz,
    /// Branch if less than or equal to zero (signed): `BLEZ Rs label`.
    Blez,
    /// Branch if greater than or equal to zero (signed): `BGEZ Rs label`.
    Bgez,
    /// Unconditional jump: `JUMP label`.
    Jump,
    /// End of program.
    Eop,
    /// FP word load: `LWS Fd imm(Rbase)`.
    Lws,
    /// FP word store: `SWS Fsrc imm(Rbase)`.
    Sws,
    /// FP add: `ADDS Fd Fs Ft`.
    Adds,
    /// FP subtract: `SUBS Fd Fs Ft`.
    Subs,
    /// FP multiply: `MULTS Fd Fs Ft`.
    Mults,
    /// FP divide: `DIVS Fd Fs Ft`.
    Divs,
}

/// Reservation-station functional classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum FuncClass {
    /// Integer ALU ops, integer multiply/divide, branches, and jumps.
    Integer,
    /// FP add/subtract.
    FpAdd,
    /// FP multiply/divide.
    FpMul,
    /// Loads and stores (the load/store buffer).
    Load,
}

/// Execution-unit classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum UnitClass {
    /// Integer ALU (also resolves branches and jumps).
    Integer,
    /// FP adder.
    Adder,
    /// Multiplier, shared by `MULT` and `MULTS`.
    Multiplier,
    /// Divider, shared by `DIV` and `DIVS`.
    Divider,
    /// Memory unit for loads and stores.
    Memory,
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "Integer",
            Self::Adder => "Adder",
            Self::Multiplier => "Multiplier",
            Self::Divider => "Divider",
            Self::Memory => "Memory",
        };
        write!(f, "{name}")
    }
}

impl Opcode {
    /// True for conditional branches and `JUMP`.
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            Self::Beqz
                | Self::Bnez
                | Self::Bltz
                | Self::Bgtz
                | Self::Blez
                | Self::Bgez
                | Self::Jump
        )
    }

    /// True for `LW` and `LWS`.
    pub fn is_load(self) -> bool {
        matches!(self, Self::Lw | Self::Lws)
    }

    /// True for `SW` and `SWS`.
    pub fn is_store(self) -> bool {
        matches!(self, Self::Sw | Self::Sws)
    }

    /// True for any load or store.
    pub fn is_memory(self) -> bool {
        self.is_load() || self.is_store()
    }

    /// Reservation-station class this opcode waits in, or `None` for `EOP`.
    pub fn func_class(self) -> Option<FuncClass> {
        match self {
            Self::Add
            | Self::Addi
            | Self::Sub
            | Self::Subi
            | Self::Xor
            | Self::And
            | Self::Mult
            | Self::Div
            | Self::Beqz
            | Self::Bnez
            | Self::Bltz
            | Self::Bgtz
            | Self::Blez
            | Self::Bgez
            | Self::Jump => Some(FuncClass::Integer),
            Self::Adds | Self::Subs => Some(FuncClass::FpAdd),
            Self::Mults | Self::Divs => Some(FuncClass::FpMul),
            Self::Lw | Self::Sw | Self::Lws | Self::Sws => Some(FuncClass::Load),
            Self::Eop => None,
        }
    }

    /// Execution-unit class this opcode runs on, or `None` for `EOP`.
    pub fn unit_class(self) -> Option<UnitClass> {
        match self {
            Self::Add
            | Self::Addi
            | Self::Sub
            | Self::Subi
            | Self::Xor
            | Self::And
            | Self::Beqz
            | Self::Bnez
            | Self::Bltz
            | Self::Bgtz
            | Self::Blez
            | Self::Bgez
            | Self::Jump => Some(UnitClass::Integer),
            Self::Adds | Self::Subs => Some(UnitClass::Adder),
            Self::Mult | Self::Mults => Some(UnitClass::Multiplier),
            Self::Div | Self::Divs => Some(UnitClass::Divider),
            Self::Lw | Self::Sw | Self::Lws | Self::Sws => Some(UnitClass::Memory),
            Self::Eop => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lw => "LW",
            Self::Sw => "SW",
            Self::Add => "ADD",
            Self::Addi => "ADDI",
            Self::Sub => "SUB",
            Self::Subi => "SUBI",
            Self::Xor => "XOR",
            Self::And => "AND",
            Self::Mult => "MULT",
            Self::Div => "DIV",
            Self::Beqz => "BEQZ",
            Self::Bnez => "BNEZ",
            Self::Bltz => "BLTZ",
            Self::Bgtz => "BGTZ",
            Self::Blez => "BLEZ",
            Self::Bgez => "BGEZ",
            Self::Jump => "JUMP",
            Self::Eop => "EOP",
            Self::Lws => "LWS",
            Self::Sws => "SWS",
            Self::Adds => "ADDS",
            Self::Subs => "SUBS",
            Self::Mults => "MULTS",
            Self::Divs => "DIVS",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Opcode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LW" => Ok(Self::Lw),
            "SW" => Ok(Self::Sw),
            "ADD" => Ok(Self::Add),
            "ADDI" => Ok(Self::Addi),
            "SUB" => Ok(Self::Sub),
            "SUBI" => Ok(Self::Subi),
            "XOR" => Ok(Self::Xor),
            "AND" => Ok(Self::And),
            "MULT" => Ok(Self::Mult),
            "DIV" => Ok(Self::Div),
            "BEQZ" => Ok(Self::Beqz),
            "BNEZ" => Ok(Self::Bnez),
            "BLTZ" => Ok(Self::Bltz),
            "BGTZ" => Ok(Self::Bgtz),
            "BLEZ" => Ok(Self::Blez),
            "BGEZ" => Ok(Self::Bgez),
            "JUMP" => Ok(Self::Jump),
            "EOP" => Ok(Self::Eop),
            "LWS" => Ok(Self::Lws),
            "SWS" => Ok(Self::Sws),
            "ADDS" => Ok(Self::Adds),
            "SUBS" => Ok(Self::Subs),
            "MULTS" => Ok(Self::Mults),
            "DIVS" => Ok(Self::Divs),
            _ => Err(()),
        }
    }
}
