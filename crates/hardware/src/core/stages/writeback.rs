//! Write-Result stage: result computation and broadcast.

use crate::core::Engine;
use crate::core::alu::alu;
use crate::core::rob::RobState;
use tracing::trace;

/// For every unit whose countdown has reached zero and whose instruction has
/// not yet broadcast: compute the result, mark the ROB entry ready, resolve
/// every station operand waiting on it (idealized unlimited fan-out in one
/// cycle), and free the unit and the station.
///
/// Loads read the word at the address computed at Execute-Start; branches
/// resolve to their target; stores produce no result value.
pub(crate) fn write_result_stage(e: &mut Engine) {
    for unit in 0..e.units.len() {
        let Some(pc) = e.units.get(unit).pc else {
            continue;
        };
        if e.units.get(unit).busy != 0 {
            continue;
        }
        let Some(station) = e.stations.find_by_pc(pc) else {
            continue;
        };
        let Some(entry) = e.stations.entry(station) else {
            continue;
        };
        let (dest, op1, op2, address) = (entry.dest, entry.op1, entry.op2, entry.address);

        // A unit that started this cycle may not broadcast this cycle.
        if e.rob.get(dest).is_some_and(|en| en.executed_at == Some(e.cycle)) {
            continue;
        }

        let index = e.instr_index(pc);
        let opcode = e.program[index].opcode;
        let result = if opcode.is_load() {
            Some(e.mem.read_word(address.unwrap_or(0)))
        } else if opcode.is_store() {
            None
        } else {
            let v1 = op1.value().unwrap_or(0);
            let v2 = op2.value().unwrap_or(0);
            Some(alu(opcode, v1, v2, e.program[index].imm, pc))
        };

        if let Some(en) = e.rob.get_mut(dest) {
            en.value = result;
            en.address = address;
            en.ready = true;
            en.state = RobState::WrittenResult;
            en.written_at = Some(e.cycle);
        }
        if let Some(value) = result {
            e.stations.broadcast(dest, value);
        }
        e.stations.release(station);
        e.units.release(unit);
        e.program[index].executing = false;

        trace!(
            "WR  cycle={} pc={pc:#010x} {opcode} rob={dest} value={result:?}",
            e.cycle
        );
    }
}
