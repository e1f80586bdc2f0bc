//! Simulation statistics.

use serde::Serialize;

/// Counters accumulated over a whole run.
///
/// Hazard counts record detections, so a RAW dependency resolved by
/// forwarding still increments `data_hazards` even though no cycle was
/// lost. Stall counts record lost cycles, split by cause.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SimStats {
    /// Clock cycles elapsed.
    pub cycles: u64,
    /// Instructions retired.
    pub instructions: u64,
    /// Retired loads and stores.
    pub data_transfer_instructions: u64,
    /// Retired ALU operations.
    pub alu_instructions: u64,
    /// Retired branches and jumps.
    pub control_instructions: u64,
    /// Cycles the front end spent frozen.
    pub total_stalls: u64,
    /// Stall cycles caused by data hazards.
    pub stalls_data_hazards: u64,
    /// Stall cycles caused by control hazards.
    pub stalls_control_hazards: u64,
    /// Data hazards detected.
    pub data_hazards: u64,
    /// Control hazards (mispredictions reaching Execute).
    pub control_hazards: u64,
    /// Branches resolved against their prediction.
    pub branch_mispredictions: u64,
}

impl SimStats {
    /// Cycles per instruction. An empty run reports `cycles` rather than
    /// dividing by zero.
    pub fn cpi(&self) -> f64 {
        self.cycles as f64 / self.instructions.max(1) as f64
    }

    /// Prints a human-readable summary to stdout.
    pub fn print(&self) {
        println!("\n===== Simulation Statistics =====");
        println!("Total cycles:              {}", self.cycles);
        println!("Total instructions:        {}", self.instructions);
        println!("CPI:                       {:.3}", self.cpi());
        println!("---------------------------------");
        println!("Data transfer:             {}", self.data_transfer_instructions);
        println!("ALU:                       {}", self.alu_instructions);
        println!("Control:                   {}", self.control_instructions);
        println!("---------------------------------");
        println!("Total stalls:              {}", self.total_stalls);
        println!("  from data hazards:       {}", self.stalls_data_hazards);
        println!("  from control hazards:    {}", self.stalls_control_hazards);
        println!("Data hazards detected:     {}", self.data_hazards);
        println!("Control hazards:           {}", self.control_hazards);
        println!("Branch mispredictions:     {}", self.branch_mispredictions);
        println!("=================================");
    }
}
