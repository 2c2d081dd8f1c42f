//! Configuration for the scanner and the signature updater.
//!
//! Both configs render into a [`CommandLine`], the ordered token sequence
//! handed to the external executable. Building a command line is pure: no
//! I/O happens until the command is actually spawned.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// An ordered sequence of command-line tokens: the program followed by its
/// arguments.
///
/// A `CommandLine` is derived once from a configuration and never mutated
/// afterwards; the scanner owns its copy for the life of the instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Creates a command line consisting of just the program token.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            tokens: vec![program.into()],
        }
    }

    /// Appends an argument token, returning the extended command line.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.push(arg);
        self
    }

    pub(crate) fn push(&mut self, arg: impl Into<String>) {
        self.tokens.push(arg.into());
    }

    /// Returns the program token.
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Returns the argument tokens (everything after the program).
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// Returns all tokens, program included.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Configuration for the scanner executable.
///
/// Fields are rendered into scanner flags by
/// [`build_command`](ScanConfig::build_command); unset options produce no
/// tokens.
///
/// # Examples
///
/// ```rust
/// use clampipe::ScanConfig;
///
/// let config = ScanConfig::default()
///     .with_database("/var/lib/clamav")
///     .with_max_filesize(50 * 1024 * 1024)
///     .with_infected_only(true);
///
/// let command = config.build_command();
/// assert_eq!(command.program(), "clamscan");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Path to the scanner executable.
    pub executable: PathBuf,

    /// Signature database file or directory (`-d`).
    pub database: Option<PathBuf>,

    /// Skip files larger than this many bytes (`--max-filesize`).
    pub max_filesize: Option<u64>,

    /// Stop scanning an archive past this many bytes (`--max-scansize`).
    pub max_scansize: Option<u64>,

    /// Only report infected files (`-i`).
    pub infected_only: bool,

    /// Verbose scanner output (`-v`).
    pub verbose: bool,

    /// Additional arguments appended verbatim after the rendered flags.
    pub extra_args: Vec<String>,

    /// Upper bound on a single scan, refresh excluded.
    pub scan_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("clamscan"),
            database: None,
            max_filesize: None,
            max_scansize: None,
            infected_only: false,
            verbose: false,
            extra_args: Vec::new(),
            scan_timeout: Duration::from_secs(300),
        }
    }
}

impl ScanConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scanner executable.
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Sets the signature database path.
    pub fn with_database(mut self, database: impl Into<PathBuf>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Sets the per-file size limit in bytes.
    pub fn with_max_filesize(mut self, bytes: u64) -> Self {
        self.max_filesize = Some(bytes);
        self
    }

    /// Sets the per-archive scan size limit in bytes.
    pub fn with_max_scansize(mut self, bytes: u64) -> Self {
        self.max_scansize = Some(bytes);
        self
    }

    /// Enables or disables infected-only reporting.
    pub fn with_infected_only(mut self, enabled: bool) -> Self {
        self.infected_only = enabled;
        self
    }

    /// Enables or disables verbose scanner output.
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Appends extra arguments passed to the scanner verbatim.
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the scan timeout.
    pub fn with_scan_timeout(mut self, timeout: Duration) -> Self {
        self.scan_timeout = timeout;
        self
    }

    /// Renders this configuration into a scanner command line.
    pub fn build_command(&self) -> CommandLine {
        let mut command = CommandLine::new(self.executable.to_string_lossy());
        if let Some(database) = &self.database {
            command.push("-d");
            command.push(database.to_string_lossy());
        }
        if let Some(limit) = self.max_filesize {
            command.push(format!("--max-filesize={limit}"));
        }
        if let Some(limit) = self.max_scansize {
            command.push(format!("--max-scansize={limit}"));
        }
        if self.infected_only {
            command.push("-i");
        }
        if self.verbose {
            command.push("-v");
        }
        for arg in &self.extra_args {
            command.push(arg);
        }
        command
    }
}

/// Configuration for the signature-refresh executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Path to the refresh executable.
    pub executable: PathBuf,

    /// Directory holding the signature database (`--datadir`).
    pub datadir: Option<PathBuf>,

    /// Refresh tool configuration file (`--config-file`).
    pub config_file: Option<PathBuf>,

    /// Additional arguments appended verbatim after the rendered flags.
    pub extra_args: Vec<String>,

    /// Upper bound on a single refresh attempt.
    pub update_timeout: Duration,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("freshclam"),
            datadir: None,
            config_file: None,
            extra_args: Vec::new(),
            update_timeout: Duration::from_secs(300),
        }
    }
}

impl UpdateConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the refresh executable.
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Sets the signature database directory.
    pub fn with_datadir(mut self, datadir: impl Into<PathBuf>) -> Self {
        self.datadir = Some(datadir.into());
        self
    }

    /// Sets the refresh tool configuration file.
    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(config_file.into());
        self
    }

    /// Appends extra arguments passed to the refresh tool verbatim.
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the refresh timeout.
    pub fn with_update_timeout(mut self, timeout: Duration) -> Self {
        self.update_timeout = timeout;
        self
    }

    /// Renders this configuration into a refresh command line.
    pub fn build_command(&self) -> CommandLine {
        let mut command = CommandLine::new(self.executable.to_string_lossy());
        if let Some(datadir) = &self.datadir {
            command.push(format!("--datadir={}", datadir.display()));
        }
        if let Some(config_file) = &self.config_file {
            command.push(format!("--config-file={}", config_file.display()));
        }
        for arg in &self.extra_args {
            command.push(arg);
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_accessors() {
        let command = CommandLine::new("clamscan").with_arg("-i").with_arg("-");
        assert_eq!(command.program(), "clamscan");
        assert_eq!(command.args(), &["-i".to_string(), "-".to_string()]);
        assert_eq!(command.tokens().len(), 3);
    }

    #[test]
    fn test_default_scan_config_renders_bare_command() {
        let command = ScanConfig::default().build_command();
        assert_eq!(command.program(), "clamscan");
        assert!(command.args().is_empty());
    }

    #[test]
    fn test_scan_config_renders_flags_in_order() {
        let command = ScanConfig::default()
            .with_database("/var/lib/clamav")
            .with_max_filesize(1024)
            .with_max_scansize(4096)
            .with_infected_only(true)
            .with_verbose(true)
            .with_extra_args(["--no-summary"])
            .build_command();

        assert_eq!(
            command.args(),
            &[
                "-d".to_string(),
                "/var/lib/clamav".to_string(),
                "--max-filesize=1024".to_string(),
                "--max-scansize=4096".to_string(),
                "-i".to_string(),
                "-v".to_string(),
                "--no-summary".to_string(),
            ]
        );
    }

    #[test]
    fn test_update_config_renders_flags() {
        let command = UpdateConfig::default()
            .with_datadir("/var/lib/clamav")
            .with_config_file("/etc/freshclam.conf")
            .build_command();

        assert_eq!(command.program(), "freshclam");
        assert_eq!(
            command.args(),
            &[
                "--datadir=/var/lib/clamav".to_string(),
                "--config-file=/etc/freshclam.conf".to_string(),
            ]
        );
    }

    #[test]
    fn test_config_builder_is_pure() {
        let config = ScanConfig::default().with_verbose(true);
        let first = config.build_command();
        let second = config.build_command();
        assert_eq!(first, second);
    }
}
