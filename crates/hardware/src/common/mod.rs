//! Common utilities and types used throughout the engine.
//!
//! This module provides fundamental building blocks shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** The uninitialized-word pattern and instruction geometry.
//! 2. **Error Handling:** Fatal engine errors and assembly-load failures.
//! 3. **Register Management:** Architected register files and the rename/tag table.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for engine execution and program loading.
pub mod error;

/// Architected register files and the rename table.
pub mod reg;

pub use constants::{INSTR_BYTES, NUM_REGISTERS, UNDEFINED};
pub use error::{EngineError, LoadError};
pub use reg::{RegClass, RegisterFile, RenameTable};
