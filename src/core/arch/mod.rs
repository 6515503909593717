//! Architectural state visible to every pipeline stage.

/// The scoreboarded architectural register file.
pub mod regfile;

pub use regfile::RegisterFile;
