//! Shared library for `NuEnrollment`
//! Contains the record store, roster queries and configuration used by the CLI

pub mod config;
pub mod core;
pub mod logger;

pub use self::core::get_version;
