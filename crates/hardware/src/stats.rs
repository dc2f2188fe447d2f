//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the engine. It provides:
//! 1. **Cycle and IPC:** Total cycles, committed instructions, and derived IPC.
//! 2. **Stalls:** Cycles in which issue could not proceed.
//! 3. **Flushes:** Branch mispredictions that wiped the pipeline.

/// Execution statistics.
#[derive(Debug, Clone, Default)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (squash-committed branches included).
    pub instructions_committed: u64,
    /// Cycles in which an issue attempt stalled on a full station pool or ROB.
    pub issue_stalls: u64,
    /// Branch mispredictions that triggered a full pipeline flush.
    pub branch_flushes: u64,
}

impl SimStats {
    /// Instructions committed per cycle.
    pub fn ipc(&self) -> f64 {
        let cycles = if self.cycles == 0 { 1 } else { self.cycles };
        self.instructions_committed as f64 / cycles as f64
    }

    /// Prints the statistics report to stdout.
    pub fn print(&self) {
        println!("==========================================================");
        println!("OUT-OF-ORDER SIMULATION STATISTICS");
        println!("==========================================================");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_committed);
        println!("sim_ipc                  {:.4}", self.ipc());
        println!("issue_stalls             {}", self.issue_stalls);
        println!("branch_flushes           {}", self.branch_flushes);
        println!("==========================================================");
    }
}
