//! Core types for dupesweep.
//!
//! This crate provides the fundamental data structures used throughout
//! the dupesweep ecosystem: file records, the per-scan catalog, error
//! and warning types, and size formatting.

mod catalog;
mod config;
mod error;
mod format;
mod record;

pub use catalog::{FileCatalog, FingerprintGroup};
pub use config::{DEFAULT_PREVIEW_BYTES, ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use format::format_size;
pub use record::{FileRecord, Fingerprint};
