//! Execution units.
//!
//! A fixed pool of typed units, each with a configured latency and a busy
//! countdown. A unit with a nonzero countdown is exclusively owned by the
//! instruction whose pc it holds; every busy countdown decrements by exactly
//! one at the end of every cycle, regardless of which stages acted.

use crate::common::error::EngineError;
use crate::config::UnitConfig;
use crate::isa::UnitClass;

/// One execution unit.
#[derive(Clone, Debug)]
pub struct ExecUnit {
    /// Unit class.
    pub class: UnitClass,
    /// Configured latency in cycles.
    pub latency: u64,
    /// Remaining busy cycles; 0 means the unit has finished (or is idle).
    pub busy: u64,
    /// Program counter of the owning instruction; `None` when idle.
    pub pc: Option<u32>,
}

/// The execution-unit pool.
#[derive(Debug)]
pub struct UnitPool {
    units: Vec<ExecUnit>,
}

impl UnitPool {
    /// Instantiates the configured unit groups.
    pub fn new(groups: &[UnitConfig]) -> Self {
        let mut units = Vec::new();
        for group in groups {
            for _ in 0..group.instances {
                units.push(ExecUnit {
                    class: group.class,
                    latency: group.latency,
                    busy: 0,
                    pc: None,
                });
            }
        }
        Self { units }
    }

    /// Returns the number of units in the pool.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true when the pool has no units at all.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns the number of units currently owned by an instruction.
    pub fn in_use(&self) -> usize {
        self.units.iter().filter(|u| u.pc.is_some()).count()
    }

    /// Finds a free unit of the given class.
    ///
    /// Returns `Ok(None)` when every unit of the class is busy (a stall,
    /// retried next cycle). A configuration with zero units of the class is
    /// fatal at this first use.
    pub fn acquire(&self, class: UnitClass, pc: u32) -> Result<Option<usize>, EngineError> {
        if !self.units.iter().any(|u| u.class == class) {
            return Err(EngineError::NoUnitForClass { class, pc });
        }
        Ok(self
            .units
            .iter()
            .position(|u| u.class == class && u.busy == 0 && u.pc.is_none()))
    }

    /// Binds a unit to the instruction at `pc` and starts its countdown.
    pub fn start(&mut self, idx: usize, pc: u32) {
        let unit = &mut self.units[idx];
        unit.busy = unit.latency;
        unit.pc = Some(pc);
    }

    /// Returns the unit at `idx`.
    pub fn get(&self, idx: usize) -> &ExecUnit {
        &self.units[idx]
    }

    /// Releases a unit after its result has been broadcast.
    pub fn release(&mut self, idx: usize) {
        self.units[idx].pc = None;
        self.units[idx].busy = 0;
    }

    /// Decrements every busy countdown by one; runs once per cycle.
    pub fn countdown_tick(&mut self) {
        for unit in &mut self.units {
            if unit.busy > 0 {
                unit.busy -= 1;
            }
        }
    }

    /// Unbinds every unit and clears every countdown.
    pub fn flush(&mut self) {
        for unit in &mut self.units {
            unit.pc = None;
            unit.busy = 0;
        }
    }
}
