//! Report rendering for the recording monitor.
//!
//! Turns per-channel summaries into the XML format read by PRTG custom
//! sensors.

pub mod prtg;

pub use monitor_core as core;
pub use prtg::{PrtgReport, ReportLimits, ResultChannel};
