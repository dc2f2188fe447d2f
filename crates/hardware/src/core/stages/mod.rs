//! The four pipeline stages, run once per cycle in fixed order:
//! Issue, Execute-Start, Write-Result, Commit.
//!
//! State mutated by an earlier stage is visible to later stages in the same
//! cycle; the cycle stamps carried in the ROB entries enforce the minimum
//! one-cycle separation between issue/execute, execute/write-result, and
//! write-result/commit for any single instruction.

pub(crate) mod commit;
pub(crate) mod execute;
pub(crate) mod issue;
pub(crate) mod writeback;
