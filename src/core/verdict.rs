//! Scan verdict classification.
//!
//! The scanner executable communicates its result exclusively through its
//! exit status. This module maps that status onto the tri-state [`Verdict`]
//! consumed by callers.

use serde::{Deserialize, Serialize};

/// The outcome of a single scan invocation.
///
/// A `Verdict` is always a *successful* result of the scan operation, even
/// when the scanner could not render a judgement: failures to refresh the
/// signature database or to launch the scanner are reported separately as
/// [`ScanError`](crate::core::error::ScanError) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The scanner found no threats (exit code 0).
    Clean,

    /// The scanner detected malware (exit code 1).
    Infected,

    /// The scanner ran but could not produce a judgement
    /// (any other exit code, or termination by signal).
    ScanError,
}

impl Verdict {
    /// Classifies a subprocess exit code into a verdict.
    ///
    /// Exit code 0 means clean, 1 means infected, and anything else
    /// (including `None` for signal-terminated processes) means the scan
    /// itself failed.
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Clean,
            Some(1) => Self::Infected,
            _ => Self::ScanError,
        }
    }

    /// Returns `true` if the payload was found clean.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// Returns `true` if the payload was found infected.
    pub fn is_infected(&self) -> bool {
        matches!(self, Self::Infected)
    }

    /// Returns `true` if the scanner could not render a judgement.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ScanError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_zero_is_clean() {
        let verdict = Verdict::from_exit_code(Some(0));
        assert_eq!(verdict, Verdict::Clean);
        assert!(verdict.is_clean());
        assert!(!verdict.is_infected());
    }

    #[test]
    fn test_exit_code_one_is_infected() {
        let verdict = Verdict::from_exit_code(Some(1));
        assert_eq!(verdict, Verdict::Infected);
        assert!(verdict.is_infected());
    }

    #[test]
    fn test_other_exit_codes_are_scan_errors() {
        for code in [2, 40, 127, -1] {
            let verdict = Verdict::from_exit_code(Some(code));
            assert_eq!(verdict, Verdict::ScanError, "exit code {code}");
            assert!(verdict.is_error());
        }
    }

    #[test]
    fn test_signal_termination_is_scan_error() {
        assert_eq!(Verdict::from_exit_code(None), Verdict::ScanError);
    }
}
