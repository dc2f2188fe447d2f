//! Execute-Start stage: dataflow-driven unit binding.

use crate::common::error::EngineError;
use crate::core::Engine;
use crate::core::rob::RobState;
use tracing::trace;

/// Starts execution for every populated, non-executing station whose
/// operands are both resolved and for which a unit of the matching class is
/// free. Instructions issued this very cycle wait until the next one.
///
/// Loads and stores complete their effective address here by adding the
/// resolved base register into the offset seeded at issue. A store's data is
/// not read here; commit fetches it from the architected file.
pub(crate) fn execute_stage(e: &mut Engine) -> Result<(), EngineError> {
    for station in 0..e.stations.len() {
        let Some(entry) = e.stations.entry(station) else {
            continue;
        };
        let (pc, dest, op1, op2) = (entry.pc, entry.dest, entry.op1, entry.op2);
        if !op1.is_resolved() || !op2.is_resolved() {
            continue;
        }

        let index = e.instr_index(pc);
        if e.program[index].executing {
            continue;
        }
        if e.rob.get(dest).is_some_and(|en| en.issued_at == e.cycle) {
            continue;
        }

        let opcode = e.program[index].opcode;
        let Some(class) = opcode.unit_class() else {
            continue;
        };
        let Some(unit) = e.units.acquire(class, pc)? else {
            continue;
        };

        if opcode.is_memory() {
            let base = op1.value().unwrap_or(0);
            if let Some(en) = e.stations.entry_mut(station) {
                en.address = Some(en.address.unwrap_or(0).wrapping_add(base));
            }
        }

        e.units.start(unit, pc);
        if let Some(en) = e.rob.get_mut(dest) {
            en.state = RobState::Executing;
            en.executed_at = Some(e.cycle);
        }
        e.program[index].executing = true;

        trace!("EX  cycle={} pc={pc:#010x} {opcode} unit={class}", e.cycle);
    }
    Ok(())
}
