//! The instruction pipeline.
//!
//! This module contains the seven-stage pipeline: the inter-stage latches,
//! the hazard detection and operand-forwarding logic, and the stage
//! implementations themselves.

/// Hazard detection and the pending-write forwarding table.
pub mod hazards;

/// Inter-stage pipeline latches.
pub mod latches;

/// Pipeline stage implementations.
pub mod stages;

pub use hazards::ForwardTable;
pub use latches::{InFlight, Latch, Latches};
