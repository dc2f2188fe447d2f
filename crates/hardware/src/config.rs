//! Configuration system for the engine.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (memory, ROB, stations, units).
//! 2. **Structures:** Hierarchical config for memory, ROB, stations, units, and pipeline.
//!
//! Configuration is supplied as JSON (see [`Config`]) or via `Config::default()`.

use crate::isa::UnitClass;
use serde::Deserialize;

/// Default configuration constants for the engine.
///
/// These values define the baseline hardware configuration when not
/// explicitly overridden in a JSON configuration file.
mod defaults {
    /// Data memory size in bytes (1 KiB).
    pub const MEMORY_SIZE: usize = 1024;

    /// Reorder buffer capacity in entries.
    pub const ROB_ENTRIES: usize = 16;

    /// Integer reservation stations.
    pub const INT_STATIONS: usize = 4;

    /// FP add/sub reservation stations.
    pub const FP_ADD_STATIONS: usize = 3;

    /// FP mult/div reservation stations.
    pub const FP_MUL_STATIONS: usize = 2;

    /// Load/store buffers.
    pub const LOAD_STATIONS: usize = 2;

    /// Instructions the engine attempts to issue per cycle.
    pub const ISSUE_WIDTH: usize = 1;

    /// Integer ALU latency in cycles.
    pub const INTEGER_LATENCY: u64 = 1;

    /// FP adder latency in cycles.
    pub const ADDER_LATENCY: u64 = 4;

    /// Multiplier latency in cycles.
    pub const MULTIPLIER_LATENCY: u64 = 8;

    /// Divider latency in cycles.
    pub const DIVIDER_LATENCY: u64 = 16;

    /// Memory unit latency in cycles.
    pub const MEMORY_LATENCY: u64 = 5;
}

/// Root configuration structure containing all engine settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use tomasim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.rob.entries, 16);
/// assert_eq!(config.pipeline.issue_width, 1);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use tomasim_core::config::Config;
/// use tomasim_core::isa::UnitClass;
///
/// let json = r#"{
///     "memory": { "size_bytes": 256 },
///     "rob": { "entries": 8 },
///     "stations": { "integer": 2, "fp_add": 2, "fp_mul": 2, "load": 1 },
///     "units": [
///         { "class": "Integer", "latency": 1, "instances": 2 },
///         { "class": "Adder", "latency": 4 },
///         { "class": "Multiplier", "latency": 6 },
///         { "class": "Divider", "latency": 10 },
///         { "class": "Memory", "latency": 5 }
///     ],
///     "pipeline": { "issue_width": 2 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.rob.entries, 8);
/// assert_eq!(config.units[0].class, UnitClass::Integer);
/// assert_eq!(config.units[0].instances, 2);
/// assert_eq!(config.units[1].instances, 1);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Data memory configuration.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Reorder buffer configuration.
    #[serde(default)]
    pub rob: RobConfig,
    /// Reservation-station counts per functional class.
    #[serde(default)]
    pub stations: StationConfig,
    /// Execution units (type, latency, instance count).
    #[serde(default = "Config::default_units")]
    pub units: Vec<UnitConfig>,
    /// Pipeline configuration.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory: MemoryConfig::default(),
            rob: RobConfig::default(),
            stations: StationConfig::default(),
            units: Self::default_units(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Config {
    /// Returns the default execution-unit pool: one unit of every class.
    fn default_units() -> Vec<UnitConfig> {
        vec![
            UnitConfig::new(UnitClass::Integer, defaults::INTEGER_LATENCY),
            UnitConfig::new(UnitClass::Adder, defaults::ADDER_LATENCY),
            UnitConfig::new(UnitClass::Multiplier, defaults::MULTIPLIER_LATENCY),
            UnitConfig::new(UnitClass::Divider, defaults::DIVIDER_LATENCY),
            UnitConfig::new(UnitClass::Memory, defaults::MEMORY_LATENCY),
        ]
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Data memory size in bytes.
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    /// Returns the default data memory size in bytes.
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_SIZE,
        }
    }
}

/// Reorder buffer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RobConfig {
    /// Number of ROB entries (the ring capacity).
    #[serde(default = "RobConfig::default_entries")]
    pub entries: usize,
}

impl RobConfig {
    /// Returns the default ROB capacity.
    fn default_entries() -> usize {
        defaults::ROB_ENTRIES
    }
}

impl Default for RobConfig {
    fn default() -> Self {
        Self {
            entries: defaults::ROB_ENTRIES,
        }
    }
}

/// Reservation-station counts per functional class.
#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    /// Integer reservation stations.
    #[serde(default = "StationConfig::default_integer")]
    pub integer: usize,

    /// FP add/sub reservation stations.
    #[serde(default = "StationConfig::default_fp_add")]
    pub fp_add: usize,

    /// FP mult/div reservation stations.
    #[serde(default = "StationConfig::default_fp_mul")]
    pub fp_mul: usize,

    /// Load/store buffers.
    #[serde(default = "StationConfig::default_load")]
    pub load: usize,
}

impl StationConfig {
    /// Returns the default Integer station count.
    fn default_integer() -> usize {
        defaults::INT_STATIONS
    }

    /// Returns the default FP add/sub station count.
    fn default_fp_add() -> usize {
        defaults::FP_ADD_STATIONS
    }

    /// Returns the default FP mult/div station count.
    fn default_fp_mul() -> usize {
        defaults::FP_MUL_STATIONS
    }

    /// Returns the default load/store buffer count.
    fn default_load() -> usize {
        defaults::LOAD_STATIONS
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            integer: defaults::INT_STATIONS,
            fp_add: defaults::FP_ADD_STATIONS,
            fp_mul: defaults::FP_MUL_STATIONS,
            load: defaults::LOAD_STATIONS,
        }
    }
}

/// One group of identical execution units.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitConfig {
    /// Unit class.
    pub class: UnitClass,

    /// Latency in cycles (must be at least 1).
    pub latency: u64,

    /// Number of identical units of this class to instantiate.
    #[serde(default = "UnitConfig::default_instances")]
    pub instances: usize,
}

impl UnitConfig {
    /// Creates a single-instance unit group.
    pub fn new(class: UnitClass, latency: u64) -> Self {
        Self {
            class,
            latency,
            instances: 1,
        }
    }

    /// Returns the default instance count for a unit group.
    fn default_instances() -> usize {
        1
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Maximum instructions the engine attempts to issue in one cycle.
    #[serde(default = "PipelineConfig::default_issue_width")]
    pub issue_width: usize,
}

impl PipelineConfig {
    /// Returns the default issue width.
    fn default_issue_width() -> usize {
        defaults::ISSUE_WIDTH
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            issue_width: defaults::ISSUE_WIDTH,
        }
    }
}
