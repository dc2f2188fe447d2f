//! Architected register files and the rename (tag) table.
//!
//! The register file holds the committed 32-bit values of the integer and
//! floating-point registers. The rename table runs in parallel: it maps each
//! register to the ROB slot of its latest in-flight producer, or `None` when
//! the architected value is current. Tags are written only by the Issue stage
//! and cleared only by the ROB entry that owns them — commit clears a tag
//! through [`RenameTable::clear_if_match`], so a committing instruction never
//! steals a tag claimed by a younger write to the same register.

use crate::common::constants::{NUM_REGISTERS, UNDEFINED};

/// Which architected register file a register id refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegClass {
    /// Integer register (`R0`–`R31`).
    Int,
    /// Floating-point register (`F0`–`F31`).
    Fp,
}

/// Architected integer and floating-point register values.
///
/// All registers power up to the [`UNDEFINED`] pattern, matching the
/// behavior of the modeled machine; reads of never-written registers return
/// that pattern rather than failing.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    int: [u32; NUM_REGISTERS],
    fp: [u32; NUM_REGISTERS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a register file with every register set to the uninitialized pattern.
    pub fn new() -> Self {
        Self {
            int: [UNDEFINED; NUM_REGISTERS],
            fp: [UNDEFINED; NUM_REGISTERS],
        }
    }

    /// Reads the raw 32-bit word of a register.
    pub fn read(&self, class: RegClass, idx: usize) -> u32 {
        match class {
            RegClass::Int => self.int[idx],
            RegClass::Fp => self.fp[idx],
        }
    }

    /// Writes the raw 32-bit word of a register.
    pub fn write(&mut self, class: RegClass, idx: usize, val: u32) {
        match class {
            RegClass::Int => self.int[idx] = val,
            RegClass::Fp => self.fp[idx] = val,
        }
    }
}

/// Rename table: per-register tag of the pending producer ROB slot.
#[derive(Debug, Clone)]
pub struct RenameTable {
    int: [Option<usize>; NUM_REGISTERS],
    fp: [Option<usize>; NUM_REGISTERS],
}

impl Default for RenameTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RenameTable {
    /// Creates a rename table with no pending producers.
    pub fn new() -> Self {
        Self {
            int: [None; NUM_REGISTERS],
            fp: [None; NUM_REGISTERS],
        }
    }

    /// Returns the ROB slot of the latest pending producer for a register,
    /// or `None` if the architected value is current.
    pub fn producer(&self, class: RegClass, idx: usize) -> Option<usize> {
        match class {
            RegClass::Int => self.int[idx],
            RegClass::Fp => self.fp[idx],
        }
    }

    /// Marks a register as pending on the given ROB slot.
    ///
    /// A later issue to the same register overwrites the previous tag: the
    /// last-issued producer owns the register (WAW resolved in issue order).
    pub fn set_producer(&mut self, class: RegClass, idx: usize, tag: usize) {
        match class {
            RegClass::Int => self.int[idx] = Some(tag),
            RegClass::Fp => self.fp[idx] = Some(tag),
        }
    }

    /// Clears a register's pending tag, but only if it still names `tag`.
    ///
    /// A committing instruction must not clear a tag that a younger issue to
    /// the same register has already reclaimed.
    pub fn clear_if_match(&mut self, class: RegClass, idx: usize, tag: usize) {
        let slot = match class {
            RegClass::Int => &mut self.int[idx],
            RegClass::Fp => &mut self.fp[idx],
        };
        if *slot == Some(tag) {
            *slot = None;
        }
    }

    /// Clears every pending tag (all speculative state is gone).
    pub fn flush(&mut self) {
        self.int = [None; NUM_REGISTERS];
        self.fp = [None; NUM_REGISTERS];
    }
}
