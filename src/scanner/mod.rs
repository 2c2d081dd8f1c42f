//! The scan orchestrator.
//!
//! [`Scanner`] owns an immutable command line derived from its
//! configuration and, per scan, refreshes the signature database, pipes the
//! payload into a fresh scanner subprocess, drains its output streams, and
//! classifies the exit code into a [`Verdict`].

use crate::config::{CommandLine, ScanConfig, UpdateConfig};
use crate::core::error::ScanError;
use crate::core::source::ByteSource;
use crate::core::verdict::Verdict;
use crate::update::{Freshclam, SignatureRefresher};

use std::process::{Output, Stdio};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Trailing token telling the scanner to read the payload from stdin.
const STDIN_MARKER: &str = "-";

/// Asynchronous facade over the external scanning executable.
///
/// Construction derives the full command line (configured flags plus the
/// stdin marker) once; no I/O happens until [`scan`](Scanner::scan) is
/// called. A `Scanner` carries no per-scan state, so one instance can serve
/// any number of concurrent scans, each spawning its own subprocess.
///
/// # Examples
///
/// ```rust,ignore
/// use clampipe::{MemorySource, ScanConfig, Scanner, Verdict};
///
/// # async fn run() -> Result<(), clampipe::ScanError> {
/// let scanner = Scanner::new(ScanConfig::default());
/// let mut source = MemorySource::new(b"file content".to_vec());
///
/// match scanner.scan(&mut source).await? {
///     Verdict::Clean => println!("no threats found"),
///     Verdict::Infected => println!("malware detected"),
///     Verdict::ScanError => println!("scanner could not render a verdict"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Scanner {
    command: CommandLine,
    refresher: Arc<dyn SignatureRefresher>,
    scan_timeout: Duration,
}

impl Scanner {
    /// Creates a scanner with the given configuration and a default
    /// [`Freshclam`] refresher.
    pub fn new(config: ScanConfig) -> Self {
        Self::with_update_config(config, UpdateConfig::default())
    }

    /// Creates a scanner with explicit refresh-tool configuration.
    pub fn with_update_config(config: ScanConfig, update: UpdateConfig) -> Self {
        Self::with_refresher(config, Arc::new(Freshclam::new(update)))
    }

    /// Creates a scanner with an injected refresher collaborator.
    pub fn with_refresher(config: ScanConfig, refresher: Arc<dyn SignatureRefresher>) -> Self {
        let command = config.build_command().with_arg(STDIN_MARKER);
        Self {
            command,
            refresher,
            scan_timeout: config.scan_timeout,
        }
    }

    /// Returns the command line this scanner will execute, stdin marker
    /// included.
    pub fn command(&self) -> &CommandLine {
        &self.command
    }

    /// Scans the payload held by `source` and classifies the result.
    ///
    /// The signature database is refreshed first on every call; the source
    /// is then rewound to its start, read in full, and piped into a fresh
    /// scanner subprocess.
    ///
    /// # Errors
    ///
    /// * [`ScanError::Refresh`] - the database refresh failed; the scanner
    ///   subprocess was never launched.
    /// * [`ScanError::Launch`] - the scanner executable could not start.
    /// * [`ScanError::Timeout`] - the subprocess overran the scan timeout.
    /// * [`ScanError::Io`] - reading the source or feeding the subprocess
    ///   failed.
    ///
    /// An unexpected exit code is *not* an error: it is reported as
    /// [`Verdict::ScanError`].
    pub async fn scan<S: ByteSource>(&self, source: &mut S) -> Result<Verdict, ScanError> {
        self.refresher.refresh().await?;

        source.rewind().await?;
        let payload = source.read_to_end().await?;

        let output = self.run_scanner(&payload).await?;

        if !output.stdout.is_empty() {
            tracing::debug!(
                stdout = %String::from_utf8_lossy(&output.stdout),
                "scanner output"
            );
        }
        if !output.stderr.is_empty() {
            tracing::debug!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "scanner diagnostics"
            );
        }

        let verdict = Verdict::from_exit_code(output.status.code());
        match verdict {
            Verdict::Clean => tracing::info!("no virus detected"),
            Verdict::Infected => tracing::warn!("virus detected"),
            Verdict::ScanError => {
                tracing::error!(code = ?output.status.code(), "error scanning")
            }
        }

        Ok(verdict)
    }

    /// Spawns the scanner subprocess, feeds it the payload on stdin, and
    /// collects its exit status and output streams.
    async fn run_scanner(&self, payload: &[u8]) -> Result<Output, ScanError> {
        let mut child = Command::new(self.command.program())
            .args(self.command.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ScanError::launch(self.command.program(), source))?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            ScanError::launch(
                self.command.program(),
                std::io::Error::other("child stdin was not captured"),
            )
        })?;

        // Feed stdin concurrently with the wait so a child that fills its
        // output pipes before consuming all input cannot deadlock us.
        let feed = async {
            stdin.write_all(payload).await?;
            stdin.shutdown().await?;
            drop(stdin);
            Ok::<_, std::io::Error>(())
        };
        let wait = tokio::time::timeout(self.scan_timeout, child.wait_with_output());

        let (fed, waited) = tokio::join!(feed, wait);

        let output = waited
            .map_err(|_| ScanError::Timeout {
                elapsed: self.scan_timeout,
            })?
            .map_err(ScanError::Io)?;

        // A scanner that exits before draining stdin closes the pipe on us;
        // its exit code is still the authoritative result.
        if let Err(err) = fed {
            if err.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(ScanError::Io(err));
            }
        }

        Ok(output)
    }
}
