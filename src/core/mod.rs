//! Core module: record model, storage and roster queries

pub mod backend;
pub mod database;
pub mod error;
pub mod models;
pub mod report;
pub mod roster;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{CascadeSummary, RecordStore};

/// Returns the current version of the `NuEnrollment` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
