//! Error types for the clampipe library.
//!
//! This module provides structured, typed errors for all failure scenarios.
//! The library never panics; all errors are returned as `Result` values.
//!
//! Note the boundary drawn in [`crate::core::verdict`]: an unexpected exit
//! code from the scanner is a [`Verdict::ScanError`](crate::Verdict) value,
//! not an error. The types here cover failures *around* the scan — the
//! signature refresh, the subprocess launch, and the plumbing in between.

use std::time::Duration;
use thiserror::Error;

/// Error type for signature-database refresh operations.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The refresh executable could not be started.
    #[error("failed to launch refresh tool '{program}': {source}")]
    Launch {
        /// The executable that could not be started.
        program: String,
        /// The underlying spawn error.
        source: std::io::Error,
    },

    /// The refresh executable ran but exited non-zero.
    #[error("signature refresh failed with exit code {code:?}")]
    Failed {
        /// Exit code of the refresh executable, if it exited normally.
        code: Option<i32>,
    },

    /// The refresh did not complete within the configured timeout.
    #[error("signature refresh timed out after {elapsed:?}")]
    Timeout {
        /// How long the refresh ran before timing out.
        elapsed: Duration,
    },

    /// An I/O error occurred while waiting on the refresh subprocess.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RefreshError {
    /// Creates a `Launch` error.
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }
}

/// The main error type for scan operations.
///
/// A scan either produces a [`Verdict`](crate::Verdict) or one of these
/// errors; the two are never conflated. In particular, a missing scanner
/// executable surfaces as [`ScanError::Launch`], distinct from the
/// `Verdict::ScanError` outcome that reports an unexpected exit code.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The signature-database refresh failed; the scanner was never launched.
    #[error("signature refresh failed: {0}")]
    Refresh(#[from] RefreshError),

    /// The scanner executable could not be started.
    #[error("failed to launch scanner '{program}': {source}")]
    Launch {
        /// The executable that could not be started.
        program: String,
        /// The underlying spawn error.
        source: std::io::Error,
    },

    /// The scan did not complete within the configured timeout.
    #[error("scan timed out after {elapsed:?}")]
    Timeout {
        /// How long the scan ran before timing out.
        elapsed: Duration,
    },

    /// An I/O error occurred while reading the input or talking to the
    /// scanner subprocess.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Creates a `Launch` error.
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }

    /// Returns `true` if the failure happened before the scanner subprocess
    /// was launched.
    pub fn is_pre_launch(&self) -> bool {
        matches!(self, Self::Refresh(_) | Self::Launch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_error_display() {
        let err = RefreshError::Failed { code: Some(52) };
        assert!(err.to_string().contains("52"));
    }

    #[test]
    fn test_launch_error_display() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ScanError::launch("clamscan", source);
        assert!(err.to_string().contains("clamscan"));
        assert!(err.is_pre_launch());
    }

    #[test]
    fn test_refresh_error_converts_to_scan_error() {
        let err: ScanError = RefreshError::Failed { code: None }.into();
        assert!(matches!(err, ScanError::Refresh(_)));
        assert!(err.is_pre_launch());
    }

    #[test]
    fn test_timeout_is_not_pre_launch() {
        let err = ScanError::Timeout {
            elapsed: Duration::from_secs(300),
        };
        assert!(!err.is_pre_launch());
    }
}
