//! Simulation front end: the assembly-text loader.

/// Assembly program loader.
pub mod loader;

pub use loader::{load_file, parse_program};
