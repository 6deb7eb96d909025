//! CLI command handlers for `NuEnrollment`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod config;
pub mod course;
pub mod enrollment;
pub mod export;
pub mod student;

use nu_enrollment::config::DatabaseConfig;
use nu_enrollment::core::report::{ReportGenerator, Table, TextReporter};
use nu_enrollment::core::{RecordStore, StoreError};
use nu_enrollment::{error, verbose};
use std::io::{self, Write};

/// Open the configured record store, exiting on failure
pub fn open_store(config: &DatabaseConfig) -> RecordStore {
    match RecordStore::open(config) {
        Ok(store) => {
            verbose!("✓ Connected to {} database", store.backend_name());
            store
        }
        Err(e) => {
            error!("Failed to open database ({}): {e}", config.backend);
            eprintln!("✗ Failed to open database: {e}");
            std::process::exit(1);
        }
    }
}

/// Report a failed store operation and exit with status 1
pub fn fail(action: &str, err: &StoreError) -> ! {
    error!("{action} failed ({}): {err}", err.kind());
    eprintln!("✗ {err}");
    std::process::exit(1);
}

/// Ask a y/n question on stdout; anything but `y`/`yes` is a no
pub fn confirm(question: &str) -> bool {
    print!("{question} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes")
}

/// Print a roster table, or a note when it is empty
pub fn print_table(table: &Table) {
    if table.is_empty() {
        println!("No {} found.", table.name);
    } else {
        print!("{}", TextReporter::new().render(table));
    }
}
