//! Trace and final-state rendering.
//!
//! The engine emits structured events; everything human-readable is
//! produced here: the loaded-program listing, the per-cycle stage trace,
//! the final register and data-memory dump, and the machine-readable JSON
//! report.

use serde::Serialize;

use crate::core::memory::CodeMemory;
use crate::core::trace::CycleTrace;
use crate::core::Cpu;

/// Prints the loaded program, one record per line.
pub fn print_code_listing(code: &CodeMemory) {
    println!("Loaded {} instruction(s)", code.len());
    for (i, inst) in code.instructions().iter().enumerate() {
        let pc = code.base() + 4 * i as u32;
        println!("  I{i} ({pc}): {inst}");
    }
}

/// Prints one cycle's stage trace, one line per stage from Fetch through
/// Writeback.
pub fn print_cycle(trace: &CycleTrace) {
    println!(
        "\n-------------------------------- CLOCK CYCLE {} --------------------------------\n",
        trace.cycle
    );
    // Events are recorded in tick order (Writeback first); the banner
    // reads in datapath order.
    for event in trace.stages.iter().rev() {
        match &event.slot {
            Some(view) => println!(
                "Instruction at {:<10} stage -->      (I{}:{}) {}",
                event.stage.name(),
                view.index,
                view.pc,
                view.inst
            ),
            None => println!(
                "Instruction at {:<10} stage -->      EMPTY",
                event.stage.name()
            ),
        }
    }
}

/// Prints the final register file and data-memory dump.
pub fn print_final_state(cpu: &Cpu, dump_words: usize) {
    println!("\n ======================= STATE OF ARCHITECTURAL REGISTER FILE ========================\n");
    for (i, (value, valid)) in cpu.regs.entries().enumerate() {
        let status = if valid { "VALID" } else { "INVALID" };
        println!("|\tREG[{i}]\t\t|\tValue = {value}\t\t|\tStatus = {status}\t\t|");
    }

    println!("\n ======================== STATE OF DATA MEMORY ======================= \n");
    for (i, value) in cpu.data_memory.words().iter().take(dump_words).enumerate() {
        println!("|\tMEM({i})\t\t|\tData Value = {value}\t\t|");
    }
}

/// One register's final state in the JSON report.
#[derive(Debug, Serialize)]
pub struct RegisterState {
    /// Register index.
    pub index: usize,
    /// Committed value.
    pub value: i32,
    /// Whether the register was valid when the run ended.
    pub valid: bool,
}

/// Machine-readable final-state report.
#[derive(Debug, Serialize)]
pub struct FinalState {
    /// Clock cycles executed.
    pub cycles: u64,
    /// Instructions retired.
    pub instructions_retired: u64,
    /// Whether a HALT retired.
    pub halted: bool,
    /// All sixteen registers.
    pub registers: Vec<RegisterState>,
    /// The dumped data-memory prefix.
    pub memory: Vec<i32>,
}

/// Builds the JSON report from the final engine state.
pub fn final_state(cpu: &Cpu, dump_words: usize) -> FinalState {
    FinalState {
        cycles: cpu.clock,
        instructions_retired: cpu.stats.instructions_retired,
        halted: cpu.halted,
        registers: cpu
            .regs
            .entries()
            .enumerate()
            .map(|(index, (value, valid))| RegisterState {
                index,
                value,
                valid,
            })
            .collect(),
        memory: cpu.data_memory.words().iter().take(dump_words).copied().collect(),
    }
}
