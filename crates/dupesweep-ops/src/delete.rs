//! Physical file deletion with catalog and ledger bookkeeping.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use dupesweep_core::FileCatalog;

use crate::ledger::{DeletionLedger, LedgerError, LedgerStats};

/// Why a delete request was refused. The catalog and ledger are left
/// unchanged in every failure case.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// The file does not exist (including a repeat delete).
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    /// The filesystem refused the removal.
    #[error("Permission denied deleting {path}")]
    PermissionDenied { path: PathBuf },

    /// Other I/O failure during removal.
    #[error("Failed to delete {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was removed but the ledger could not be persisted.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl DeleteError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Delete a file from disk, drop its catalog record, and account for it
/// in the ledger. Returns the updated ledger snapshot.
///
/// The size is captured before removal so the ledger credits the bytes
/// actually freed. Nothing is mutated unless the physical removal
/// succeeds.
pub fn delete_file(
    path: &Path,
    catalog: &mut FileCatalog,
    ledger: &mut DeletionLedger,
) -> Result<LedgerStats, DeleteError> {
    let metadata = std::fs::symlink_metadata(path).map_err(|e| DeleteError::io(path, e))?;
    let size = metadata.len();

    std::fs::remove_file(path).map_err(|e| DeleteError::io(path, e))?;
    info!(path = %path.display(), size, "deleted file");

    catalog.remove_by_path(path);
    ledger.record_deletion(path, size)?;

    Ok(ledger.stats())
}
