//! PRTG "EXE/Script Advanced" sensor output.
//!
//! One connection-health row, then a total-files row and a today row per
//! channel. A failed connection yields the health row alone.

use monitor_core::error::{MonitorError, Result};
use monitor_core::models::ChannelSummary;
use monitor_core::settings::Settings;
use serde::Serialize;
use tracing::debug;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Name of the row reporting whether the listing could be fetched.
pub const CONNECTION_HEALTH: &str = "Connection Health";

/// PRTG value lookup mapping 0/1 to ok/timeout.
pub const HEALTH_LOOKUP: &str = "prtg.customlookups.gvb-sensor.timeout";

const TOTAL_ERROR_MSG: &str = "Too many files are stored";
const TOTAL_WARNING_MSG: &str = "Transferring files failed";

// ── Limits ────────────────────────────────────────────────────────────────────

/// Upper limits attached to every `<channel> Total files` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    pub warning_max: u64,
    pub error_max: u64,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            warning_max: 50,
            error_max: 70,
        }
    }
}

impl ReportLimits {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            warning_max: settings.total_warning_max,
            error_max: settings.total_error_max,
        }
    }
}

// ── XML model ─────────────────────────────────────────────────────────────────

/// Limit modes understood by PRTG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitMode {
    Disabled = 0,
    Enabled = 1,
}

/// One `<result>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultChannel {
    pub channel: String,
    pub value: String,
    pub unit: String,
    #[serde(rename = "customunit", skip_serializing_if = "Option::is_none")]
    pub custom_unit: Option<String>,
    #[serde(rename = "limitmode")]
    pub limit_mode: u8,
    #[serde(rename = "limitmaxerror", skip_serializing_if = "Option::is_none")]
    pub limit_max_error: Option<String>,
    #[serde(rename = "limitmaxwarning", skip_serializing_if = "Option::is_none")]
    pub limit_max_warning: Option<String>,
    #[serde(rename = "limiterrormsg", skip_serializing_if = "Option::is_none")]
    pub limit_error_msg: Option<String>,
    #[serde(rename = "limitwarningmsg", skip_serializing_if = "Option::is_none")]
    pub limit_warning_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(rename = "valuelookup", skip_serializing_if = "Option::is_none")]
    pub value_lookup: Option<String>,
}

impl ResultChannel {
    fn plain(channel: String, value: u64, limit_mode: LimitMode) -> Self {
        Self {
            channel,
            value: value.to_string(),
            unit: "custom".to_string(),
            custom_unit: Some("files".to_string()),
            limit_mode: limit_mode as u8,
            limit_max_error: None,
            limit_max_warning: None,
            limit_error_msg: None,
            limit_warning_msg: None,
            warning: None,
            value_lookup: None,
        }
    }

    /// Connection-health row; `failed` reports value 1.
    pub fn connection_health(failed: bool) -> Self {
        Self {
            channel: CONNECTION_HEALTH.to_string(),
            value: if failed { "1" } else { "0" }.to_string(),
            unit: "Count".to_string(),
            custom_unit: None,
            limit_mode: LimitMode::Disabled as u8,
            limit_max_error: None,
            limit_max_warning: None,
            limit_error_msg: None,
            limit_warning_msg: None,
            warning: Some("1".to_string()),
            value_lookup: Some(HEALTH_LOOKUP.to_string()),
        }
    }

    /// `<channel> Total files` row with the configured limits.
    pub fn total_files(summary: &ChannelSummary, limits: &ReportLimits) -> Self {
        Self {
            limit_max_error: Some(limits.error_max.to_string()),
            limit_max_warning: Some(limits.warning_max.to_string()),
            limit_error_msg: Some(TOTAL_ERROR_MSG.to_string()),
            limit_warning_msg: Some(TOTAL_WARNING_MSG.to_string()),
            ..Self::plain(
                format!("{} Total files", summary.channel),
                summary.total,
                LimitMode::Enabled,
            )
        }
    }

    /// `<channel> Today Rec` row.
    pub fn today_recordings(summary: &ChannelSummary) -> Self {
        Self::plain(
            format!("{} Today Rec", summary.channel),
            summary.today,
            LimitMode::Disabled,
        )
    }
}

/// The `<prtg>` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrtgReport {
    #[serde(rename = "result")]
    pub results: Vec<ResultChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl PrtgReport {
    /// Healthy report: health row followed by two rows per summary, in order.
    pub fn success(summaries: &[ChannelSummary], limits: &ReportLimits, text: Option<String>) -> Self {
        let mut results = Vec::with_capacity(1 + summaries.len() * 2);
        results.push(ResultChannel::connection_health(false));
        for summary in summaries {
            results.push(ResultChannel::total_files(summary, limits));
            results.push(ResultChannel::today_recordings(summary));
        }
        Self { results, text }
    }

    /// Report for a run where the listing could not be fetched.
    pub fn connection_failure(text: Option<String>) -> Self {
        Self {
            results: vec![ResultChannel::connection_health(true)],
            text,
        }
    }

    /// Render as an indented XML document with declaration.
    pub fn to_xml(&self) -> Result<String> {
        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some("prtg"))
            .map_err(|e| MonitorError::Report(e.to_string()))?;
        serializer.indent(' ', 2);
        self.serialize(serializer)
            .map_err(|e| MonitorError::Report(e.to_string()))?;

        debug!("Rendered PRTG report with {} results", self.results.len());
        Ok(format!("{XML_DECLARATION}\n{body}"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
