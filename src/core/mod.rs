//! The pipeline engine.
//!
//! [`Cpu`] owns every piece of state the stages share: the scoreboarded
//! register file, the code and data memories, the PC, the inter-stage
//! latches, the forwarding table, and the global control flags. One call
//! to [`Cpu::tick`] advances the machine one clock cycle by running the
//! stages in reverse datapath order (Writeback, Memory2, Memory1,
//! Execute2, Execute1, Decode/RF, Fetch) so each stage consumes the latch
//! its producer wrote last cycle without double buffering.

/// Architectural register file.
pub mod arch;

/// Code and data memories.
pub mod memory;

/// Latches, hazards, and the seven stages.
pub mod pipeline;

/// Structured per-cycle trace events.
pub mod trace;

/// Execution units.
pub mod units;

use crate::common::EngineFault;
use crate::config::MachineConfig;
use crate::isa::Instruction;
use crate::stats::SimStats;
use arch::RegisterFile;
use memory::{CodeMemory, DataMemory};
use pipeline::stages::{decode, execute, fetch, memory_access, write_back};
use pipeline::{ForwardTable, Latches};
use trace::CycleTrace;

/// How Decode/RF resolves data hazards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardMode {
    /// Stall until source operands are valid in the register file.
    Stall,
    /// Additionally adopt published results of in-flight producers.
    Forwarding,
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Clock cycles executed.
    pub cycles: u64,
    /// Whether a HALT retired (otherwise the cycle budget expired).
    pub halted: bool,
}

/// The engine context shared by every stage.
pub struct Cpu {
    /// Architectural register file with validity scoreboard.
    pub regs: RegisterFile,
    /// Word-addressed data memory.
    pub data_memory: DataMemory,
    /// The loaded program.
    pub code: CodeMemory,
    /// Byte address of the next instruction Fetch will read.
    pub pc: u32,
    /// Hazard resolution policy (the stall-only / forwarding variant).
    pub mode: HazardMode,
    /// The seven inter-stage latches.
    pub latches: Latches,
    /// Pending-write table consulted by Decode/RF in forwarding mode.
    pub forwards: ForwardTable,
    /// A HALT has entered Decode/RF; Fetch is frozen.
    pub halting: bool,
    /// A HALT has retired; the run is over.
    pub halted: bool,
    /// Branch target computed by Execute2, to be consumed by Fetch.
    pub redirect: Option<u32>,
    /// Whether the last branch condition was obtained by forwarding
    /// rather than from the register file.
    pub forwarded: bool,
    /// Clock cycles executed so far.
    pub clock: u64,
    /// Run statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Builds an engine over a loaded program.
    ///
    /// Registers and data memory start zeroed; the PC starts at the code
    /// base address.
    pub fn new(program: Vec<Instruction>, mode: HazardMode, machine: &MachineConfig) -> Self {
        Self {
            regs: RegisterFile::new(),
            data_memory: DataMemory::new(machine.data_memory_words),
            code: CodeMemory::new(machine.code_base, program),
            pc: machine.code_base,
            mode,
            latches: Latches::default(),
            forwards: ForwardTable::new(),
            halting: false,
            halted: false,
            redirect: None,
            forwarded: false,
            clock: 0,
            stats: SimStats::default(),
        }
    }

    /// Advances the machine one clock cycle.
    ///
    /// Returns the cycle's structured trace, or the fault that aborted
    /// the run. Ticking a halted machine is a no-op that reports an
    /// all-empty cycle.
    pub fn tick(&mut self) -> Result<CycleTrace, EngineFault> {
        self.clock += 1;
        self.stats.cycles = self.clock;
        let mut trace = CycleTrace::new(self.clock);

        write_back::tick(self, &mut trace);
        memory_access::tick_memory2(self, &mut trace)?;
        memory_access::tick_memory1(self, &mut trace);
        execute::tick_execute2(self, &mut trace);
        execute::tick_execute1(self, &mut trace);
        decode::tick(self, &mut trace)?;
        fetch::tick(self, &mut trace);

        Ok(trace)
    }

    /// Runs for at most `cycles` clock cycles, stopping early when HALT
    /// retires. The budget is inclusive: `run(n)` executes exactly `n`
    /// ticks unless the machine halts first.
    pub fn run(&mut self, cycles: u64) -> Result<RunOutcome, EngineFault> {
        for _ in 0..cycles {
            if self.halted {
                break;
            }
            let _ = self.tick()?;
        }
        Ok(RunOutcome {
            cycles: self.clock,
            halted: self.halted,
        })
    }

    /// Number of issued-but-uncommitted register writers currently in the
    /// pipeline (occupants of the Execute1 through Writeback latches that
    /// write a register). Each corresponds to exactly one invalid
    /// register.
    pub fn issued_writers(&self) -> usize {
        [
            &self.latches.execute1,
            &self.latches.execute2,
            &self.latches.memory1,
            &self.latches.memory2,
            &self.latches.write_back,
        ]
        .into_iter()
        .filter_map(|latch| latch.occupant())
        .filter(|inflight| inflight.inst.opcode.writes_register())
        .count()
    }
}
