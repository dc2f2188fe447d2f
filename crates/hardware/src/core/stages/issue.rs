//! Issue stage: station and ROB allocation, operand capture, renaming.
//!
//! Source operands are captured BEFORE the destination's rename tag is
//! overwritten, so an instruction reading its own destination (e.g.
//! `ADDI R5 R5 16`) sees the previous producer, not itself.

use crate::common::reg::{RegisterFile, RenameTable};
use crate::core::Engine;
use crate::core::rob::{ReorderBuffer, RobEntry};
use crate::core::station::{Operand, StationEntry};
use crate::isa::{Opcode, OperandSpec};
use tracing::trace;

/// Attempts up to `issue_width` issues at the current program counter.
///
/// Each attempt needs a free reservation station of the instruction's class
/// and a free ROB slot; the first attempt that cannot issue ends the cycle's
/// issue loop without advancing the program counter.
pub(crate) fn issue_stage(e: &mut Engine) {
    for _ in 0..e.issue_width {
        let Some(index) = e.fetch_index() else { break };
        let opcode = e.program[index].opcode;
        if opcode == Opcode::Eop || e.program[index].issued {
            break;
        }
        let Some(class) = opcode.func_class() else {
            break;
        };
        let Some(station) = e.stations.find_free(class) else {
            e.stats.issue_stalls += 1;
            break;
        };

        let pc = e.pc;
        let dest_reg = e.program[index].dest_reg();
        let Some(tag) = e.rob.allocate(RobEntry::issued(pc, dest_reg, e.cycle)) else {
            e.stats.issue_stalls += 1;
            break;
        };

        let specs = e.program[index].operand_specs();
        let imm = e.program[index].imm;
        let op1 = capture(&e.rename, &e.regs, &e.rob, specs[0], imm);
        let op2 = capture(&e.rename, &e.regs, &e.rob, specs[1], imm);

        e.stations.bind(
            station,
            StationEntry {
                pc,
                op1,
                op2,
                dest: tag,
                address: opcode.is_memory().then_some(imm),
            },
        );
        if let Some((class, reg)) = dest_reg {
            e.rename.set_producer(class, reg, tag);
        }
        e.program[index].issued = true;
        e.pc = pc.wrapping_add(crate::common::constants::INSTR_BYTES);

        trace!("IS  cycle={} pc={:#010x} {} rob={}", e.cycle, pc, opcode, tag);
    }
}

/// Captures one operand at issue time: architected value when no producer is
/// pending, a direct forward when the naming ROB entry already holds its
/// result, otherwise the producer tag.
fn capture(
    rename: &RenameTable,
    regs: &RegisterFile,
    rob: &ReorderBuffer,
    spec: OperandSpec,
    imm: u32,
) -> Operand {
    match spec {
        OperandSpec::None => Operand::Value(0),
        OperandSpec::Imm => Operand::Value(imm),
        OperandSpec::Reg(class, reg) => match rename.producer(class, reg) {
            None => Operand::Value(regs.read(class, reg)),
            Some(tag) => match rob.get(tag) {
                Some(entry) => entry.value.map_or(Operand::Tag(tag), Operand::Value),
                // Producer already left the ROB; the value is architected.
                None => Operand::Value(regs.read(class, reg)),
            },
        },
    }
}
