//! JSON document-file backend
//!
//! The whole database is a single JSON document. Every statement is applied
//! to a working copy which is written to a temporary file in the same
//! directory and renamed over the original; only then does the in-memory
//! view advance. A failed write therefore leaves both disk and memory at the
//! previous state.

use super::Backend;
use crate::core::database::{Database, Statement};
use crate::core::error::{Result, StoreError};
use crate::{debug, info};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Backend persisting to one JSON file
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    database: Database,
}

impl JsonFileBackend {
    /// Open the document at `path`, creating an empty one (and its parent
    /// directories) when it does not exist yet.
    ///
    /// # Errors
    /// [`StoreError::Backend`] if the file cannot be read, parsed or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.as_os_str().is_empty() {
            return Err(StoreError::invalid("database path", "is required"));
        }

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                StoreError::Backend(format!("failed to read {}: {e}", path.display()))
            })?;
            let database = if content.trim().is_empty() {
                Database::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    StoreError::Backend(format!("malformed database {}: {e}", path.display()))
                })?
            };
            database.check_indexes().map_err(|e| {
                StoreError::Backend(format!("corrupt database {}: {e}", path.display()))
            })?;
            info!(
                "Opened database {} ({} students, {} courses, {} enrollments)",
                path.display(),
                database.students().len(),
                database.courses().len(),
                database.enrollments().len()
            );
            Ok(Self { path, database })
        } else {
            let backend = Self {
                path,
                database: Database::new(),
            };
            backend.write(&backend.database)?;
            info!("Created new database at {}", backend.path.display());
            Ok(backend)
        }
    }

    /// Location of the document on disk
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, database: &Database) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| {
            StoreError::Backend(format!("failed to create {}: {e}", dir.display()))
        })?;

        let temp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, database)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| {
            StoreError::Backend(format!("failed to replace {}: {}", self.path.display(), e.error))
        })?;
        Ok(())
    }
}

impl Backend for JsonFileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn database(&self) -> &Database {
        &self.database
    }

    fn execute(&mut self, statement: Statement) -> Result<usize> {
        let label = statement.to_string();
        let mut next = self.database.clone();
        let matched = next.apply(statement)?;
        if matched > 0 {
            self.write(&next)?;
            self.database = next;
        }
        debug!("{label}: {matched} matched ({})", self.path.display());
        Ok(matched)
    }
}
