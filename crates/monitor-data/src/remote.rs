//! Remote directory listing over SSH.
//!
//! Runs `ls -lha <path>` on the recording server through the system `ssh`
//! client and hands back the raw listing text.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use monitor_core::error::{MonitorError, Result};
use monitor_core::settings::Settings;
use tokio::process::Command;
use tracing::{debug, info};

/// Slack added on top of the connect timeout for the listing itself.
const COMMAND_GRACE_SECS: u64 = 30;

// ── ListingSource ─────────────────────────────────────────────────────────────

/// Anything that can produce a long-format directory listing.
pub trait ListingSource {
    fn fetch_listing(&self) -> impl Future<Output = Result<String>> + Send;
}

/// A listing fixed in memory, used for offline runs and tests.
#[derive(Debug, Clone)]
pub struct StaticListing(pub String);

impl ListingSource for StaticListing {
    async fn fetch_listing(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

// ── RemoteTarget ──────────────────────────────────────────────────────────────

/// Connection and path settings for the recording server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub hostname: String,
    pub port: u16,
    pub user: String,
    pub key_path: PathBuf,
    /// Remote directory holding the recordings.
    pub path: String,
    /// SSH connect timeout in seconds.
    pub connect_timeout: u64,
}

impl RemoteTarget {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            hostname: settings.hostname.trim().to_string(),
            port: settings.port,
            user: settings.user.clone(),
            key_path: settings.key_path(),
            path: settings.path.clone(),
            connect_timeout: settings.connect_timeout,
        }
    }

    /// `user@host` as passed to `ssh`.
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.hostname)
    }

    /// Command executed on the remote side.
    pub fn remote_command(&self) -> String {
        format!("ls -lha {}", shell_quote(&self.path))
    }

    /// Upper bound on the whole `ssh` invocation.
    pub fn overall_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout + COMMAND_GRACE_SECS)
    }

    /// Make sure the private key is readable before anything touches the network.
    pub fn validate_key(&self) -> Result<()> {
        std::fs::read(&self.key_path).map_err(|source| MonitorError::KeyRead {
            path: self.key_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Full argument vector for the `ssh` client.
    ///
    /// Host keys are not verified and no interactive prompt is ever shown.
    pub fn ssh_args(&self) -> Vec<String> {
        vec![
            "-i".to_string(),
            self.key_path.to_string_lossy().into_owned(),
            "-p".to_string(),
            self.port.to_string(),
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            "StrictHostKeyChecking=no".to_string(),
            "-o".to_string(),
            "UserKnownHostsFile=/dev/null".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", self.connect_timeout),
            "-o".to_string(),
            "LogLevel=ERROR".to_string(),
            self.destination(),
            self.remote_command(),
        ]
    }
}

// ── SshListing ────────────────────────────────────────────────────────────────

/// [`ListingSource`] backed by the system `ssh` binary.
#[derive(Debug, Clone)]
pub struct SshListing {
    target: RemoteTarget,
    program: String,
}

impl SshListing {
    pub fn new(target: RemoteTarget) -> Self {
        Self::with_program(target, "ssh")
    }

    /// Use a different client executable (e.g. a wrapper script).
    pub fn with_program(target: RemoteTarget, program: impl Into<String>) -> Self {
        Self {
            target,
            program: program.into(),
        }
    }
}

impl ListingSource for SshListing {
    async fn fetch_listing(&self) -> Result<String> {
        let args = self.target.ssh_args();
        debug!("Running {} {}", self.program, args.join(" "));

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let timeout = self.target.overall_timeout();
        let output = tokio::time::timeout(timeout, command.output())
            .await
            .map_err(|_| MonitorError::Timeout(timeout.as_secs()))?
            .map_err(|e| {
                MonitorError::Transport(format!("failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MonitorError::Transport(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let listing = String::from_utf8_lossy(&output.stdout).into_owned();
        info!(
            "Fetched {} listing lines from {}:{}",
            listing.lines().count(),
            self.target.hostname,
            self.target.path
        );
        Ok(listing)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Quote `value` for a POSIX shell unless it is made only of safe characters.
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:@%,=".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
