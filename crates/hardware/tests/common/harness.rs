use tomasim_core::Engine;
use tomasim_core::config::{Config, UnitConfig};
use tomasim_core::core::InstrEvent;
use tomasim_core::isa::UnitClass;
use tomasim_core::sim::loader;

pub struct TestContext {
    pub engine: Engine,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Self {
            engine: Engine::new(&config).unwrap(),
        }
    }

    /// Assemble `src` and load it at address 0.
    pub fn load_asm(mut self, src: &str) -> Self {
        let program = loader::parse_program(src).unwrap();
        self.engine.load_program(program, 0);
        self
    }

    /// Seed an integer register.
    pub fn with_int_reg(mut self, reg: usize, value: u32) -> Self {
        self.engine.set_int_register(reg, value);
        self
    }

    /// Seed a floating-point register.
    pub fn with_fp_reg(mut self, reg: usize, value: f32) -> Self {
        self.engine.set_fp_register(reg, value);
        self
    }

    /// Seed a word of data memory.
    pub fn with_memory_word(mut self, address: u32, value: u32) -> Self {
        self.engine.write_memory(address, value);
        self
    }

    /// Run a fixed number of cycles.
    pub fn run(&mut self, cycles: u64) {
        self.engine.run(cycles).unwrap();
    }

    /// Run until no instruction is pending.
    pub fn run_to_completion(&mut self) {
        self.engine.run_to_completion().unwrap();
    }

    /// The first event record logged for `pc`.
    pub fn event_for(&self, pc: u32) -> &InstrEvent {
        self.engine
            .events()
            .iter()
            .find(|e| e.pc == pc)
            .unwrap_or_else(|| panic!("no event logged for pc {pc:#x}"))
    }
}

/// A config with explicit station counts, unit groups, and issue width.
pub fn config(
    rob_entries: usize,
    stations: (usize, usize, usize, usize),
    units: &[(UnitClass, u64, usize)],
    issue_width: usize,
) -> Config {
    let mut config = Config::default();
    config.rob.entries = rob_entries;
    config.stations.integer = stations.0;
    config.stations.fp_add = stations.1;
    config.stations.fp_mul = stations.2;
    config.stations.load = stations.3;
    config.units = units
        .iter()
        .map(|&(class, latency, instances)| UnitConfig {
            class,
            latency,
            instances,
        })
        .collect();
    config.pipeline.issue_width = issue_width;
    config
}

/// The default one-of-each unit pool with an overridden latency set.
pub fn default_units(
    integer: u64,
    adder: u64,
    multiplier: u64,
    divider: u64,
    memory: u64,
) -> Vec<(UnitClass, u64, usize)> {
    vec![
        (UnitClass::Integer, integer, 1),
        (UnitClass::Adder, adder, 1),
        (UnitClass::Multiplier, multiplier, 1),
        (UnitClass::Divider, divider, 1),
        (UnitClass::Memory, memory, 1),
    ]
}
