//! Shared building blocks for the recording monitor.
//!
//! Holds the record and ledger models, the error type, command-line
//! settings and calendar helpers used by the data and report crates.

pub mod error;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{MonitorError, Result};
