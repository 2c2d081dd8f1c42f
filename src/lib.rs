//! # Clampipe
//!
//! An asynchronous malware-scanning facade over the ClamAV command-line
//! tools, piping payload bytes straight into the scanner's stdin.
//!
//! ## Overview
//!
//! Clampipe wraps the external `clamscan` and `freshclam` executables behind
//! one small async API, allowing you to:
//!
//! - Scan in-memory buffers or seekable async streams through one interface
//! - Keep the signature database current automatically before every scan
//! - Consume the scanner's exit code as a typed tri-state [`Verdict`]
//! - Distinguish "the scanner said no verdict" from "the tooling broke"
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use clampipe::{MemorySource, ScanConfig, Scanner, Verdict};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), clampipe::ScanError> {
//!     let scanner = Scanner::new(ScanConfig::default());
//!
//!     let mut source = MemorySource::new(b"file content".to_vec());
//!     match scanner.scan(&mut source).await? {
//!         Verdict::Clean => println!("no threats found"),
//!         Verdict::Infected => println!("malware detected"),
//!         Verdict::ScanError => println!("scanner could not render a verdict"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into a few small layers:
//!
//! - **Core**: the [`Verdict`] type, the [`ByteSource`] payload abstraction,
//!   and structured error handling
//! - **Config**: scanner/updater options and [`CommandLine`] rendering
//! - **Update**: the [`SignatureRefresher`] collaborator and its
//!   [`Freshclam`] implementation
//! - **Scanner**: subprocess orchestration and verdict classification
//!
//! Diagnostics are emitted through [`tracing`]; install any subscriber to
//! capture them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod scanner;
pub mod update;

// Re-export commonly used types at the crate root
pub use crate::config::{CommandLine, ScanConfig, UpdateConfig};
pub use crate::core::{ByteSource, MemorySource, RefreshError, ScanError, StreamSource, Verdict};
pub use crate::scanner::Scanner;
pub use crate::update::{Freshclam, SignatureRefresher};

/// Prelude module for convenient imports.
///
/// ```rust
/// use clampipe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{CommandLine, ScanConfig, UpdateConfig};
    pub use crate::core::{
        ByteSource, MemorySource, RefreshError, ScanError, StreamSource, Verdict,
    };
    pub use crate::scanner::Scanner;
    pub use crate::update::{Freshclam, SignatureRefresher};
}
