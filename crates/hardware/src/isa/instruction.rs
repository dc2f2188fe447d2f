//! Decoded instruction records.

use crate::common::reg::RegClass;
use crate::isa::opcode::Opcode;

/// Where a reservation-station operand slot gets its contents at issue time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandSpec {
    /// The slot is unused; it issues already resolved.
    None,
    /// The slot reads an architected register (value, forward, or tag).
    Reg(RegClass, usize),
    /// The slot is the instruction's immediate, resolved at issue.
    Imm,
}

/// One decoded instruction.
///
/// Created by the loader and read-only thereafter, except for the two
/// in-flight progress flags. While in flight an instruction is identified by
/// its program-counter value; `issued` enforces that at most one in-flight
/// copy of any pc exists at a time.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// First source register id, when the shape has one.
    pub src1: Option<usize>,
    /// Second source register id, when the shape has one.
    pub src2: Option<usize>,
    /// Destination register id, when the instruction writes a register.
    pub dest: Option<usize>,
    /// Immediate field. For branches and jumps this is the word-aligned
    /// relative offset already resolved from the symbolic label, so that the
    /// taken target is `pc + 4 + imm`.
    pub imm: u32,
    /// Currently in flight (set at Issue, cleared at Commit and by Flush).
    pub issued: bool,
    /// Currently bound to an execution unit (set at Execute-Start, cleared
    /// at Write-Result and by Flush).
    pub executing: bool,
}

impl Instruction {
    /// Creates a decoded instruction with clear progress flags.
    pub fn new(
        opcode: Opcode,
        src1: Option<usize>,
        src2: Option<usize>,
        dest: Option<usize>,
        imm: u32,
    ) -> Self {
        Self {
            opcode,
            src1,
            src2,
            dest,
            imm,
            issued: false,
            executing: false,
        }
    }

    /// The destination register this instruction writes, if any.
    pub fn dest_reg(&self) -> Option<(RegClass, usize)> {
        let class = match self.opcode {
            Opcode::Lw
            | Opcode::Add
            | Opcode::Addi
            | Opcode::Sub
            | Opcode::Subi
            | Opcode::Xor
            | Opcode::And
            | Opcode::Mult
            | Opcode::Div => RegClass::Int,
            Opcode::Lws | Opcode::Adds | Opcode::Subs | Opcode::Mults | Opcode::Divs => {
                RegClass::Fp
            }
            _ => return None,
        };
        self.dest.map(|d| (class, d))
    }

    /// The register holding a store's data, read from the architected file
    /// at commit time.
    pub fn store_data_reg(&self) -> Option<(RegClass, usize)> {
        match self.opcode {
            Opcode::Sw => self.src1.map(|r| (RegClass::Int, r)),
            Opcode::Sws => self.src1.map(|r| (RegClass::Fp, r)),
            _ => None,
        }
    }

    /// How each of the two reservation-station operand slots is filled.
    ///
    /// Memory ops carry their base register in slot 1 (the offset is seeded
    /// into the station's address field instead); branches carry the
    /// condition register in slot 1.
    pub fn operand_specs(&self) -> [OperandSpec; 2] {
        let reg = |class, r: Option<usize>| {
            r.map_or(OperandSpec::None, |idx| OperandSpec::Reg(class, idx))
        };
        match self.opcode {
            Opcode::Add | Opcode::Sub | Opcode::Xor | Opcode::And | Opcode::Mult | Opcode::Div => {
                [
                    reg(RegClass::Int, self.src1),
                    reg(RegClass::Int, self.src2),
                ]
            }
            Opcode::Addi | Opcode::Subi => [reg(RegClass::Int, self.src1), OperandSpec::Imm],
            Opcode::Adds | Opcode::Subs | Opcode::Mults | Opcode::Divs => {
                [reg(RegClass::Fp, self.src1), reg(RegClass::Fp, self.src2)]
            }
            Opcode::Beqz
            | Opcode::Bnez
            | Opcode::Bltz
            | Opcode::Bgtz
            | Opcode::Blez
            | Opcode::Bgez => [reg(RegClass::Int, self.src1), OperandSpec::None],
            // Loads address through src1, stores through src2.
            Opcode::Lw | Opcode::Lws => [reg(RegClass::Int, self.src1), OperandSpec::None],
            Opcode::Sw | Opcode::Sws => [reg(RegClass::Int, self.src2), OperandSpec::None],
            Opcode::Jump | Opcode::Eop => [OperandSpec::None, OperandSpec::None],
        }
    }
}
