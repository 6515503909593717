//! APEX Pipeline Simulator Library.
//!
//! This crate implements a cycle-accurate simulator for the APEX teaching
//! ISA: an in-order, seven-stage RISC pipeline with two-cycle Execute and
//! Memory units. Given an assembled program it advances the machine one
//! clock cycle at a time and reports the final architectural register and
//! data-memory state, the stalls and squashes taken along the way, and the
//! cycle at which HALT retires.
//!
//! # Architecture
//!
//! * **Core**: 7-stage in-order pipeline (Fetch, Decode/RF, Execute1,
//!   Execute2, Memory1, Memory2, Writeback) ticked in reverse datapath
//!   order so every stage reads last cycle's latches.
//! * **Hazards**: stall-only resolution, or operand forwarding through a
//!   per-register pending-write table (selected by [`crate::core::HazardMode`]).
//! * **Control**: single-cycle branch-delay flush on taken BZ/BNZ/JUMP.
//!
//! # Modules
//!
//! * `common`: shared error types.
//! * `config`: configuration loading and parsing.
//! * `core`: the pipeline engine.
//! * `isa`: instruction set definitions and disassembly.
//! * `sim`: program loader and state/trace printers.
//! * `stats`: run statistics collection.

/// Shared error types for the loader and the engine.
///
/// Provides the fault taxonomy used throughout the simulator: file and
/// parse problems surface before a run starts, runtime conditions abort it.
pub mod common;

/// Configuration system for trace and machine-geometry settings.
///
/// Loads and parses TOML configuration files to customize simulator
/// behavior; every field carries a default so the file is optional.
pub mod config;

/// Pipeline engine implementation.
///
/// Implements the seven-stage in-order pipeline, architectural state
/// (register file, code and data memories), inter-stage latches, hazard
/// handling, and structured per-cycle trace events.
pub mod core;

/// Instruction Set Architecture definitions.
///
/// Implements the APEX opcode set as an exhaustive enum, the immutable
/// instruction record produced by the loader, and per-opcode disassembly.
pub mod isa;

/// Simulation harness: program loader and output formatting.
///
/// Handles parsing assembly text into code memory and rendering per-cycle
/// traces and the final architectural state.
pub mod sim;

/// Run statistics collection and reporting.
///
/// Tracks cycle counts, retired instructions, stalls, squashes, and
/// forwarded operands during simulation execution.
pub mod stats;
