//! Simulator configuration.
//!
//! A small TOML file customizes tracing and machine geometry. Every field
//! has a default matching the canonical APEX machine (code based at 4000,
//! 4000 words of data memory, the first 100 words dumped), so running
//! without a configuration file is the common case and a file only needs
//! the fields it changes.

use std::fmt;
use std::fs;
use std::io;

use serde::Deserialize;

use crate::isa::CODE_BASE;

const DEFAULT_DATA_WORDS: usize = 4000;
const DEFAULT_DUMP_WORDS: usize = 100;

/// Top-level configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing and variant selection.
    pub general: GeneralConfig,
    /// Machine geometry.
    pub machine: MachineConfig,
}

/// General run options.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Print per-cycle stage traces even in `simulate` mode.
    pub trace: bool,
    /// Resolve hazards by operand forwarding instead of stalling alone.
    pub forwarding: bool,
}

/// Machine geometry options.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Byte address of the first instruction.
    pub code_base: u32,
    /// Data memory size in words.
    pub data_memory_words: usize,
    /// How many leading data-memory words the final dump prints.
    pub dump_memory_words: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            code_base: CODE_BASE,
            data_memory_words: DEFAULT_DATA_WORDS,
            dump_memory_words: DEFAULT_DUMP_WORDS,
        }
    }
}

impl Config {
    /// Loads a configuration file.
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }
}

/// Errors raised while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The file is not valid TOML for this schema.
    Parse {
        /// Path of the configuration file.
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read config '{path}': {source}"),
            Self::Parse { path, source } => write!(f, "cannot parse config '{path}': {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
