//! Simulation harness: loading programs and formatting output.

/// Program file parsing.
pub mod loader;

/// Trace and final-state rendering.
pub mod printer;
