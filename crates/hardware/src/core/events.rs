//! Per-instruction event records.
//!
//! The engine appends one record per instruction in commit order. A squashed
//! instruction is logged at flush time with the cycle stamps it had earned
//! and no commit cycle.

use std::fmt;

/// Cycle stamps of one instruction's trip through the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstrEvent {
    /// Program counter.
    pub pc: u32,
    /// Cycle the instruction issued.
    pub issue: u64,
    /// Cycle it entered execution, if it got that far.
    pub execute: Option<u64>,
    /// Cycle it wrote its result, if it got that far.
    pub write_result: Option<u64>,
    /// Cycle it committed; `None` for squashed instructions.
    pub commit: Option<u64>,
}

impl InstrEvent {
    /// Column header matching [`InstrEvent`]'s `Display` output.
    pub const LOG_HEADER: &'static str = "        PC  Issue    Exe     WR Commit";
}

impl fmt::Display for InstrEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = |c: Option<u64>| c.map_or_else(|| "-".to_string(), |v| v.to_string());
        write!(
            f,
            "{:#010x} {:>6} {:>6} {:>6} {:>6}",
            self.pc,
            self.issue,
            col(self.execute),
            col(self.write_result),
            col(self.commit),
        )
    }
}
