//! Signature-database refresh.
//!
//! Every scan is preceded by a refresh so that a stale database can never
//! silently produce a false "clean" verdict. The refresh itself is an
//! injectable collaborator: the scanner depends only on the
//! [`SignatureRefresher`] trait, with [`Freshclam`] as the production
//! implementation.

use crate::config::{CommandLine, UpdateConfig};
use crate::core::error::RefreshError;

use async_trait::async_trait;
use std::fmt::Debug;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::Mutex;

/// Keeps the malware-signature database current.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync` for use in async contexts.
/// - `refresh` must not return `Ok(())` unless the database is known to be
///   current; the scanner aborts the scan on any refresh error.
#[async_trait]
pub trait SignatureRefresher: Send + Sync + Debug {
    /// Refreshes the signature database, completing only once the refresh
    /// tool has exited.
    ///
    /// # Errors
    ///
    /// * [`RefreshError::Launch`] - the refresh executable could not start.
    /// * [`RefreshError::Failed`] - the executable exited non-zero.
    /// * [`RefreshError::Timeout`] - the refresh overran its time budget.
    async fn refresh(&self) -> Result<(), RefreshError>;
}

/// Signature refresher backed by the `freshclam` executable.
///
/// Concurrent refresh requests are serialized behind an internal gate, so
/// overlapping scans never race two refresh processes against the same
/// database directory. Every call still runs a full refresh; there is no
/// "already fresh" caching.
#[derive(Debug)]
pub struct Freshclam {
    command: CommandLine,
    timeout: Duration,
    gate: Mutex<()>,
}

impl Freshclam {
    /// Creates a refresher from the given configuration.
    ///
    /// The command line is derived once here; no I/O occurs until
    /// [`refresh`](SignatureRefresher::refresh) is called.
    pub fn new(config: UpdateConfig) -> Self {
        Self {
            command: config.build_command(),
            timeout: config.update_timeout,
            gate: Mutex::new(()),
        }
    }

    /// Returns the command line this refresher will execute.
    pub fn command(&self) -> &CommandLine {
        &self.command
    }
}

impl Default for Freshclam {
    fn default() -> Self {
        Self::new(UpdateConfig::default())
    }
}

#[async_trait]
impl SignatureRefresher for Freshclam {
    async fn refresh(&self) -> Result<(), RefreshError> {
        let _serialized = self.gate.lock().await;

        let child = Command::new(self.command.program())
            .args(self.command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RefreshError::launch(self.command.program(), source))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RefreshError::Timeout {
                elapsed: self.timeout,
            })??;

        if !output.stdout.is_empty() {
            tracing::debug!(
                stdout = %String::from_utf8_lossy(&output.stdout),
                "refresh tool output"
            );
        }
        if !output.stderr.is_empty() {
            tracing::debug!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "refresh tool diagnostics"
            );
        }

        if output.status.success() {
            tracing::debug!(program = %self.command.program(), "signature database refreshed");
            Ok(())
        } else {
            Err(RefreshError::Failed {
                code: output.status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_refresher(script: &str) -> Freshclam {
        Freshclam::new(
            UpdateConfig::default()
                .with_executable("sh")
                .with_extra_args(["-c", script]),
        )
    }

    #[tokio::test]
    async fn test_refresh_succeeds_on_zero_exit() {
        let refresher = shell_refresher("exit 0");
        assert!(refresher.refresh().await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_fails_on_nonzero_exit() {
        let refresher = shell_refresher("exit 52");
        let err = refresher.refresh().await.unwrap_err();
        assert!(matches!(err, RefreshError::Failed { code: Some(52) }));
    }

    #[tokio::test]
    async fn test_refresh_reports_missing_executable_as_launch_error() {
        let refresher = Freshclam::new(
            UpdateConfig::default().with_executable("/nonexistent/freshclam-missing"),
        );
        let err = refresher.refresh().await.unwrap_err();
        assert!(matches!(err, RefreshError::Launch { .. }));
    }

    #[tokio::test]
    async fn test_refresh_times_out_on_hung_tool() {
        let refresher = Freshclam::new(
            UpdateConfig::default()
                .with_executable("sh")
                .with_extra_args(["-c", "sleep 30"])
                .with_update_timeout(Duration::from_millis(50)),
        );
        let err = refresher.refresh().await.unwrap_err();
        assert!(matches!(err, RefreshError::Timeout { .. }));
    }

    #[test]
    fn test_command_derived_from_config() {
        let refresher = Freshclam::new(UpdateConfig::default().with_datadir("/tmp/sigs"));
        assert_eq!(refresher.command().program(), "freshclam");
        assert_eq!(refresher.command().args(), &["--datadir=/tmp/sigs".to_string()]);
    }
}
