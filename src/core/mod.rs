//! Core types and traits for the clampipe library.
//!
//! This module provides the fundamental building blocks used throughout
//! the library:
//!
//! - [`verdict`] - The tri-state [`Verdict`] and exit-code classification
//! - [`source`] - The [`ByteSource`] payload abstraction
//! - [`error`] - Structured error types

pub mod error;
pub mod source;
pub mod verdict;

// Re-export commonly used types at the core level
pub use error::{RefreshError, ScanError};
pub use source::{ByteSource, MemorySource, StreamSource};
pub use verdict::Verdict;
