//! System-wide constants.

/// Bit pattern of an architected word that was never written.
///
/// Registers and data memory power up to this pattern. It is a display
/// convention (such words print as `-`), not a validity sentinel: pending
/// results are modeled with `Option`, never by comparing against this value.
pub const UNDEFINED: u32 = 0xFFFF_FFFF;

/// Number of architected registers in each register file (integer and FP).
pub const NUM_REGISTERS: usize = 32;

/// Size of one instruction in bytes; the program counter advances by this.
pub const INSTR_BYTES: u32 = 4;
