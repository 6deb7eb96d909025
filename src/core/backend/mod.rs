//! Persistence backends for the record store
//!
//! A backend owns a [`Database`] and executes one [`Statement`] at a time.
//! Each statement either fully applies (and is durable, for backends that
//! persist) or leaves the data unchanged.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;

use super::database::{Database, Statement};
use super::error::Result;
use std::fmt;
use std::str::FromStr;

/// Storage backend for the three collections
pub trait Backend {
    /// Short backend name for logs (e.g. `memory`)
    fn name(&self) -> &'static str;

    /// Read view of the current data
    fn database(&self) -> &Database;

    /// Execute one write and return the number of documents it matched
    ///
    /// # Errors
    /// [`StoreError::Conflict`](super::error::StoreError::Conflict) on unique
    /// index violations, [`StoreError::Backend`](super::error::StoreError::Backend)
    /// when the write cannot be made durable.
    fn execute(&mut self, statement: Statement) -> Result<usize>;
}

/// Configured backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Volatile in-process storage
    Memory,
    /// JSON document file on disk
    File,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!(
                "Unknown database backend: '{s}' (expected 'file' or 'memory')"
            )),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
        }
    }
}
