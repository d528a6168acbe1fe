//! Data layer for the recording monitor.
//!
//! Parses recorder filenames, folds directory listings into per-channel
//! ledgers, and fetches those listings from the remote server.

pub mod aggregator;
pub mod analysis;
pub mod parser;
pub mod remote;

pub use monitor_core as core;
