//! Error types for scanning and analysis operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root-level structural errors. Per-entry failures during a scan never
/// surface here; they become [`ScanWarning`]s instead.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Permission denied for the root path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create an I/O error with path context, mapping well-known kinds
    /// to their dedicated variants.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// The path this error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::PermissionDenied { path }
            | Self::Io { path, .. } => path,
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Error reading a directory entry.
    ReadError,
    /// Error reading file metadata.
    MetadataError,
    /// Content fingerprint could not be computed.
    HashError,
}

/// Non-fatal warning encountered during a scan. One inaccessible entry
/// must not blind the caller to the rest of the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a read error warning.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Read error: {error}"),
            path,
            kind: WarningKind::ReadError,
        }
    }

    /// Create a metadata error warning.
    pub fn metadata_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Metadata error: {error}"),
            path,
            kind: WarningKind::MetadataError,
        }
    }

    /// Create a fingerprinting failure warning.
    pub fn hash_error(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Could not fingerprint: {}", path.display()),
            path,
            kind: WarningKind::HashError,
        }
    }
}
