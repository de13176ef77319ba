//! File system scanning engine for dupesweep.
//!
//! Walks a directory tree, extracts per-file metadata and a bounded text
//! preview, fingerprints content with BLAKE3, and accumulates everything
//! into a [`FileCatalog`] ready for exact-duplicate grouping.
//!
//! ```rust,ignore
//! use dupesweep_scan::{ScanConfig, Scanner};
//!
//! let config = ScanConfig::new("/path/to/scan").with_recursive(true);
//! let catalog = Scanner::new(config).scan()?;
//!
//! for group in catalog.group_by_fingerprint() {
//!     println!("{} copies of {}", group.count(), group.fingerprint.to_hex());
//! }
//! ```

mod fingerprint;
mod scanner;
mod walker;

pub use fingerprint::fingerprint_file;
pub use scanner::Scanner;
pub use walker::{FileEntries, walk};

// Re-export core types callers need alongside the scanner.
pub use dupesweep_core::{FileCatalog, FileRecord, Fingerprint, ScanConfig, ScanError};
