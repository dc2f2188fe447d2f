//! Flush & recovery controller.
//!
//! Invoked from Commit when a branch misprediction is detected. The wipe is
//! global and unconditional — there is no age-based partial squash, matching
//! the single-path issue policy.

use crate::core::Engine;
use crate::core::events::InstrEvent;
use tracing::trace;

/// Flush state machine. `Flushing` is held for exactly the cycle in which a
/// misprediction is detected; the transition back to `Normal` happens
/// unconditionally at the top of the next cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FlushState {
    /// Normal operation.
    Normal,
    /// A misprediction was detected this cycle.
    Flushing,
}

/// Wipes all speculative state and redirects fetch to `target`.
///
/// Every in-flight instruction is logged first, oldest to youngest: the
/// mispredicted branch (the ROB head) gets the current cycle as its commit
/// stamp, the squashed instructions behind it keep their earned stamps and
/// no commit cycle. Then every ROB entry, reservation station, rename tag,
/// unit binding, and instruction progress flag is cleared, and the ROB head
/// returns to the start of the ring.
pub(crate) fn flush_pipeline(e: &mut Engine, target: u32) {
    trace!("FL  cycle={} redirect={target:#010x}", e.cycle);

    let cycle = e.cycle;
    let squashed: Vec<InstrEvent> = e
        .rob
        .iter_in_flight()
        .enumerate()
        .map(|(i, (_, en))| InstrEvent {
            pc: en.pc,
            issue: en.issued_at,
            execute: en.executed_at,
            write_result: en.written_at,
            commit: (i == 0).then_some(cycle),
        })
        .collect();
    for event in squashed {
        let index = e.instr_index(event.pc);
        e.program[index].issued = false;
        e.program[index].executing = false;
        e.events.push(event);
    }

    e.rob.flush_all();
    e.stations.flush();
    e.rename.flush();
    e.units.flush();
    e.pc = target;
    e.flush_state = FlushState::Flushing;
}
