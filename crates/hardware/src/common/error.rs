//! Error definitions for the engine and the assembly loader.
//!
//! Two failure domains exist:
//! 1. **Engine errors:** Fatal conditions detected while simulating. Structural
//!    stalls (no free station, full ROB, busy units) are *not* errors.
//! 2. **Load errors:** Structural failures while parsing an assembly program.
//!    An unknown opcode is not a load error either — it is reported as a
//!    warning and the remainder of the load continues.

use crate::isa::UnitClass;
use thiserror::Error;

/// Fatal simulation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An issued instruction needs a unit class for which the configuration
    /// provides zero instances. Detected at first use, not at construction,
    /// because a configuration is valid as long as no instruction of the
    /// class ever reaches Execute-Start.
    #[error("no {class} execution unit configured (required by instruction at pc {pc:#010x})")]
    NoUnitForClass {
        /// The unit class the instruction requires.
        class: UnitClass,
        /// Program counter of the instruction that needed the unit.
        pc: u32,
    },

    /// The configuration is structurally unusable (zero-capacity ROB,
    /// zero issue width, or a zero-latency execution unit).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Assembly program load failure.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the program file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An operand token did not match the shape its opcode requires.
    #[error("line {line}: malformed operand `{token}`")]
    MalformedOperand {
        /// 1-based source line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// An instruction is missing a required operand.
    #[error("line {line}: missing {what} operand")]
    MissingOperand {
        /// 1-based source line number.
        line: usize,
        /// Which operand was expected.
        what: String,
    },

    /// A branch names a label that no line in the program defines.
    #[error("line {line}: undefined branch label `{label}`")]
    UndefinedLabel {
        /// 1-based source line number of the branch.
        line: usize,
        /// The unresolved label.
        label: String,
    },
}
