use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{MonitorError, Result};
use crate::time_utils::validate_timezone;

/// Channels reported when `--chan` is not given.
pub const DEFAULT_CHANNELS: &str = "itn,azadi,voa,pars,bbc,one";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Count recordings on a remote server and print a PRTG sensor report
#[derive(Parser, Debug, Clone)]
#[command(
    name = "rec-monitor",
    about = "Count recordings on a remote server and print a PRTG sensor report",
    version
)]
pub struct Settings {
    /// Node name
    #[arg(long, default_value = "node-name")]
    pub name: String,

    /// Remote hostname
    #[arg(long)]
    pub hostname: String,

    /// SSH user
    #[arg(long, default_value = "root")]
    pub user: String,

    /// SSH private key file
    #[arg(long)]
    pub key: PathBuf,

    /// SSH port
    #[arg(long, default_value = "22")]
    pub port: u16,

    /// Remote recording directory
    #[arg(long, default_value = "/var/rec")]
    pub path: String,

    /// Comma-separated channel names that are always reported
    #[arg(long = "chan", default_value = DEFAULT_CHANNELS)]
    pub chan: String,

    /// Timezone used to decide which recordings count as today (auto = system)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// SSH connect timeout in seconds (1-300)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..=300))]
    pub connect_timeout: u64,

    /// Warning limit for the per-channel total files row
    #[arg(long, default_value = "50")]
    pub total_warning_max: u64,

    /// Error limit for the per-channel total files row
    #[arg(long, default_value = "70")]
    pub total_error_max: u64,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse an explicit argument list, enabling unit-testing without
    /// spawning subprocesses.
    pub fn try_from_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Settings::try_parse_from(args)
    }

    /// Channel whitelist: trimmed, empty entries dropped, first occurrence wins.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.chan.split(',').map(str::trim) {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Key path with a leading `~/` expanded to the home directory.
    pub fn key_path(&self) -> PathBuf {
        expand_home(&self.key)
    }

    /// Log level after applying `--debug`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            &self.log_level
        }
    }

    /// Reject combinations clap cannot express on its own.
    pub fn validate(&self) -> Result<()> {
        if self.hostname.trim().is_empty() {
            return Err(MonitorError::Config("hostname must not be empty".into()));
        }
        if !validate_timezone(&self.timezone) {
            return Err(MonitorError::Config(format!(
                "unknown timezone: {}",
                self.timezone
            )));
        }
        if self.total_warning_max > self.total_error_max {
            return Err(MonitorError::Config(format!(
                "total warning limit ({}) exceeds error limit ({})",
                self.total_warning_max, self.total_error_max
            )));
        }
        Ok(())
    }
}

// ── Helper: home expansion ─────────────────────────────────────────────────────

fn expand_home(path: &std::path::Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Settings {
        let mut args = vec!["rec-monitor", "--hostname", "rec01", "--key", "/tmp/id"];
        args.extend_from_slice(extra);
        Settings::try_from_args(args).expect("valid args")
    }

    // ── defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_defaults() {
        let s = parse(&[]);
        assert_eq!(s.name, "node-name");
        assert_eq!(s.user, "root");
        assert_eq!(s.port, 22);
        assert_eq!(s.path, "/var/rec");
        assert_eq!(s.timezone, "auto");
        assert_eq!(s.connect_timeout, 10);
        assert_eq!(s.total_warning_max, 50);
        assert_eq!(s.total_error_max, 70);
        assert_eq!(s.log_level, "WARNING");
        assert_eq!(
            s.channel_names(),
            vec!["itn", "azadi", "voa", "pars", "bbc", "one"]
        );
    }

    #[test]
    fn test_hostname_and_key_are_required() {
        assert!(Settings::try_from_args(["rec-monitor", "--key", "/tmp/id"]).is_err());
        assert!(Settings::try_from_args(["rec-monitor", "--hostname", "rec01"]).is_err());
    }

    #[test]
    fn test_connect_timeout_range() {
        let args = [
            "rec-monitor",
            "--hostname",
            "rec01",
            "--key",
            "/tmp/id",
            "--connect-timeout",
            "0",
        ];
        assert!(Settings::try_from_args(args).is_err());
    }

    // ── channel_names ─────────────────────────────────────────────────────────

    #[test]
    fn test_channel_names_trims_and_dedups() {
        let s = parse(&["--chan", " bbc, voa,,bbc ,one "]);
        assert_eq!(s.channel_names(), vec!["bbc", "voa", "one"]);
    }

    #[test]
    fn test_channel_names_empty() {
        let s = parse(&["--chan", ""]);
        assert!(s.channel_names().is_empty());
    }

    // ── effective_log_level ───────────────────────────────────────────────────

    #[test]
    fn test_debug_flag_overrides_log_level() {
        let s = parse(&["--log-level", "ERROR", "--debug"]);
        assert_eq!(s.effective_log_level(), "DEBUG");
        let s = parse(&["--log-level", "ERROR"]);
        assert_eq!(s.effective_log_level(), "ERROR");
    }

    // ── key_path ──────────────────────────────────────────────────────────────

    #[test]
    fn test_key_path_absolute_unchanged() {
        let s = parse(&[]);
        assert_eq!(s.key_path(), PathBuf::from("/tmp/id"));
    }

    #[test]
    fn test_key_path_expands_home() {
        let args = ["rec-monitor", "--hostname", "h", "--key", "~/.ssh/id_rsa"];
        let s = Settings::try_from_args(args).unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(s.key_path(), home.join(".ssh/id_rsa"));
        }
    }

    // ── validate ──────────────────────────────────────────────────────────────

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(parse(&[]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_timezone() {
        let err = parse(&["--timezone", "Nowhere/Special"])
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("unknown timezone"));
    }

    #[test]
    fn test_validate_rejects_inverted_limits() {
        let s = parse(&["--total-warning-max", "80", "--total-error-max", "70"]);
        assert!(matches!(s.validate(), Err(MonitorError::Config(_))));
    }
}
