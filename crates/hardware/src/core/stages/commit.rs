//! Commit stage: in-order retirement from the ROB head.

use crate::common::constants::INSTR_BYTES;
use crate::core::Engine;
use crate::core::events::InstrEvent;
use crate::core::flush::flush_pipeline;
use tracing::trace;

/// Retires at most one instruction per cycle: the ROB head, and only if it
/// is ready and did not write back this same cycle.
///
/// Register-writing ops architect their result and release the rename tag if
/// it still names this entry. Stores write their data word to memory, the
/// value read from the architected file now that every older producer has
/// retired. A branch whose resolved target differs from the sequential
/// fall-through invokes the flush protocol instead of retiring normally.
pub(crate) fn commit_stage(e: &mut Engine) {
    let Some((tag, head)) = e.rob.peek_head() else {
        return;
    };
    if !head.ready || head.written_at == Some(e.cycle) {
        return;
    }
    let head = head.clone();
    let pc = head.pc;
    let index = e.instr_index(pc);
    let opcode = e.program[index].opcode;

    if opcode.is_branch() {
        let fallthrough = pc.wrapping_add(INSTR_BYTES);
        let target = head.value.unwrap_or(fallthrough);
        if target != fallthrough {
            e.stats.instructions_committed += 1;
            e.stats.branch_flushes += 1;
            flush_pipeline(e, target);
            return;
        }
    }

    if let Some((class, reg)) = head.dest {
        if let Some(value) = head.value {
            e.regs.write(class, reg, value);
        }
        e.rename.clear_if_match(class, reg, tag);
    }

    if let Some((class, reg)) = e.program[index].store_data_reg() {
        let data = e.regs.read(class, reg);
        if let Some(address) = head.address {
            e.mem.write_word(address, data);
        }
    }

    // The retiring value also satisfies any operand still naming this slot.
    if let Some(value) = head.value {
        e.stations.broadcast(tag, value);
    }

    e.events.push(InstrEvent {
        pc,
        issue: head.issued_at,
        execute: head.executed_at,
        write_result: head.written_at,
        commit: Some(e.cycle),
    });
    let _ = e.rob.commit_head();
    e.program[index].issued = false;
    e.stats.instructions_committed += 1;

    trace!("CM  cycle={} pc={pc:#010x} {opcode} rob={tag}", e.cycle);
}
