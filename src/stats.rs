//! Run statistics collection and reporting.
//!
//! Tracks what the pipeline did over a run: cycles, retirements by
//! instruction class, stall and squash counts, and how many operands the
//! bypass network supplied.

/// Statistics for one simulation run.
#[derive(Clone, Debug, Default)]
pub struct SimStats {
    /// Clock cycles executed.
    pub cycles: u64,
    /// Instructions retired at Writeback.
    pub instructions_retired: u64,

    /// Retired loads.
    pub inst_load: u64,
    /// Retired stores.
    pub inst_store: u64,
    /// Retired control transfers (BZ/BNZ/JUMP).
    pub inst_control: u64,
    /// Retired ALU and MOVC instructions.
    pub inst_alu: u64,

    /// Cycles Decode/RF held an instruction waiting for operands or for
    /// an older writer of its destination.
    pub stalls_data: u64,
    /// Cycles an instruction was held because its downstream latch was
    /// occupied.
    pub stalls_structural: u64,

    /// Instructions invalidated by branch flushes or the HALT freeze.
    pub squashed: u64,
    /// Taken control transfers that redirected Fetch.
    pub redirects: u64,
    /// Operands supplied by the bypass network instead of the register
    /// file.
    pub operands_forwarded: u64,
}

impl SimStats {
    /// Prints the statistics report.
    pub fn print(&self) {
        println!();
        println!("Simulation Statistics");
        println!("---------------------");
        println!("  Cycles:              {}", self.cycles);
        println!("  Retired:             {}", self.instructions_retired);
        println!("    ALU/MOVC:          {}", self.inst_alu);
        println!("    Loads:             {}", self.inst_load);
        println!("    Stores:            {}", self.inst_store);
        println!("    Control:           {}", self.inst_control);
        println!("  Data stalls:         {}", self.stalls_data);
        println!("  Structural stalls:   {}", self.stalls_structural);
        println!("  Squashed:            {}", self.squashed);
        println!("  Redirects:           {}", self.redirects);
        println!("  Operands forwarded:  {}", self.operands_forwarded);
    }
}
