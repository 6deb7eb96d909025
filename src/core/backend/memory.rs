//! Volatile backend

use super::Backend;
use crate::core::database::{Database, Statement};
use crate::core::error::Result;

/// Keeps everything in process memory; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryBackend {
    database: Database,
}

impl MemoryBackend {
    /// Empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend seeded with existing data
    #[must_use]
    pub const fn with_database(database: Database) -> Self {
        Self { database }
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn database(&self) -> &Database {
        &self.database
    }

    fn execute(&mut self, statement: Statement) -> Result<usize> {
        self.database.apply(statement)
    }
}
