//! The out-of-order engine.
//!
//! [`Engine`] is the single explicit context owning every piece of simulator
//! state: instruction store, program counter, register files, rename table,
//! reservation stations, reorder buffer, execution units, data memory, the
//! commit-ordered event log, and statistics. The pipeline driver runs the
//! four stages once per cycle in fixed order.

/// Per-instruction event records (the commit-ordered log).
pub mod events;
/// Byte-addressable data memory.
pub mod memory;
/// Reorder buffer.
pub mod rob;
/// Reservation stations.
pub mod station;
/// Execution units.
pub mod units;

mod alu;
mod flush;
mod stages;

pub use events::InstrEvent;

use crate::common::constants::INSTR_BYTES;
use crate::common::error::EngineError;
use crate::common::reg::{RegClass, RegisterFile, RenameTable};
use crate::config::Config;
use crate::isa::{Instruction, Opcode};
use crate::stats::SimStats;
use flush::FlushState;
use memory::DataMemory;
use rob::ReorderBuffer;
use station::StationPool;
use units::UnitPool;

/// The Tomasulo out-of-order engine.
#[derive(Debug)]
pub struct Engine {
    program: Vec<Instruction>,
    base_address: u32,
    pc: u32,
    regs: RegisterFile,
    rename: RenameTable,
    stations: StationPool,
    rob: ReorderBuffer,
    units: UnitPool,
    mem: DataMemory,
    events: Vec<InstrEvent>,
    stats: SimStats,
    flush_state: FlushState,
    cycle: u64,
    issue_width: usize,
}

impl Engine {
    /// Creates an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for a zero-capacity ROB, a zero
    /// issue width, or a zero-latency execution unit.
    pub fn new(config: &Config) -> Result<Self, EngineError> {
        if config.rob.entries == 0 {
            return Err(EngineError::InvalidConfig(
                "reorder buffer needs at least one entry".into(),
            ));
        }
        if config.pipeline.issue_width == 0 {
            return Err(EngineError::InvalidConfig(
                "issue width must be at least 1".into(),
            ));
        }
        if let Some(group) = config.units.iter().find(|g| g.latency == 0) {
            return Err(EngineError::InvalidConfig(format!(
                "{} unit latency must be at least 1",
                group.class
            )));
        }

        Ok(Self {
            program: Vec::new(),
            base_address: 0,
            pc: 0,
            regs: RegisterFile::new(),
            rename: RenameTable::new(),
            stations: StationPool::new(&config.stations),
            rob: ReorderBuffer::new(config.rob.entries),
            units: UnitPool::new(&config.units),
            mem: DataMemory::new(config.memory.size_bytes),
            events: Vec::new(),
            stats: SimStats::default(),
            flush_state: FlushState::Normal,
            cycle: 0,
            issue_width: config.pipeline.issue_width,
        })
    }

    /// Loads a decoded program at `base_address` and points fetch at it.
    pub fn load_program(&mut self, program: Vec<Instruction>, base_address: u32) {
        self.program = program;
        self.base_address = base_address;
        self.pc = base_address;
    }

    /// Advances the engine by one clock cycle.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError::NoUnitForClass`] when an issued instruction
    /// needs a unit class with zero configured instances.
    pub fn step(&mut self) -> Result<(), EngineError> {
        if self.flush_state == FlushState::Flushing {
            self.flush_state = FlushState::Normal;
        }
        stages::issue::issue_stage(self);
        stages::execute::execute_stage(self)?;
        stages::writeback::write_result_stage(self);
        stages::commit::commit_stage(self);
        self.units.countdown_tick();
        self.cycle += 1;
        self.stats.cycles += 1;
        Ok(())
    }

    /// Runs the engine for a fixed number of cycles.
    ///
    /// # Errors
    ///
    /// See [`Engine::step`].
    pub fn run(&mut self, cycles: u64) -> Result<(), EngineError> {
        for _ in 0..cycles {
            self.step()?;
        }
        Ok(())
    }

    /// Runs until no instruction is pending: nothing in flight, no flush in
    /// progress, and fetch sitting at `EOP` (or past the end of the program).
    ///
    /// # Errors
    ///
    /// See [`Engine::step`].
    pub fn run_to_completion(&mut self) -> Result<(), EngineError> {
        loop {
            self.step()?;
            if self.flush_state == FlushState::Normal && self.rob.is_empty() && self.at_end() {
                return Ok(());
            }
        }
    }

    /// True when fetch points at `EOP` or beyond the loaded program.
    fn at_end(&self) -> bool {
        self.fetch_index()
            .is_none_or(|i| self.program[i].opcode == Opcode::Eop)
    }

    /// Index of the instruction at the current pc, if it is inside the program.
    pub(crate) fn fetch_index(&self) -> Option<usize> {
        let offset = self.pc.checked_sub(self.base_address)?;
        let index = (offset / INSTR_BYTES) as usize;
        (index < self.program.len()).then_some(index)
    }

    /// Index of the in-flight instruction at `pc`.
    pub(crate) fn instr_index(&self, pc: u32) -> usize {
        (pc.wrapping_sub(self.base_address) / INSTR_BYTES) as usize
    }

    /// Current cycle number.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Raw word of an integer register.
    pub fn int_register(&self, reg: usize) -> u32 {
        self.regs.read(RegClass::Int, reg)
    }

    /// Sets an integer register.
    pub fn set_int_register(&mut self, reg: usize, value: u32) {
        self.regs.write(RegClass::Int, reg, value);
    }

    /// Value of a floating-point register.
    pub fn fp_register(&self, reg: usize) -> f32 {
        f32::from_bits(self.regs.read(RegClass::Fp, reg))
    }

    /// Raw word of a floating-point register.
    pub fn fp_register_bits(&self, reg: usize) -> u32 {
        self.regs.read(RegClass::Fp, reg)
    }

    /// Sets a floating-point register.
    pub fn set_fp_register(&mut self, reg: usize, value: f32) {
        self.regs.write(RegClass::Fp, reg, value.to_bits());
    }

    /// ROB slot of the pending producer for an integer register, if any.
    pub fn int_register_tag(&self, reg: usize) -> Option<usize> {
        self.rename.producer(RegClass::Int, reg)
    }

    /// ROB slot of the pending producer for a floating-point register, if any.
    pub fn fp_register_tag(&self, reg: usize) -> Option<usize> {
        self.rename.producer(RegClass::Fp, reg)
    }

    /// Writes a word of data memory (little-endian), for program setup.
    pub fn write_memory(&mut self, address: u32, value: u32) {
        self.mem.write_word(address, value);
    }

    /// The data memory image.
    pub fn memory(&self) -> &[u8] {
        self.mem.bytes()
    }

    /// The commit-ordered per-instruction event log, squashed entries included.
    pub fn events(&self) -> &[InstrEvent] {
        &self.events
    }

    /// Execution statistics.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Number of in-flight instructions in the ROB.
    pub fn rob_len(&self) -> usize {
        self.rob.len()
    }

    /// Configured ROB capacity.
    pub fn rob_capacity(&self) -> usize {
        self.rob.capacity()
    }

    /// Number of occupied reservation stations.
    pub fn stations_in_use(&self) -> usize {
        self.stations.in_use()
    }

    /// Number of execution units owned by an instruction.
    pub fn units_in_use(&self) -> usize {
        self.units.in_use()
    }
}
