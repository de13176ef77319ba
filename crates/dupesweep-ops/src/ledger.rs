//! Durable cumulative accounting of deletions.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use dupesweep_core::format_size;

/// Number of deletion events retained in visible history. Older entries
/// are dropped; their contribution stays folded into the totals.
pub const HISTORY_CAP: usize = 1000;

/// One recorded deletion event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionRecord {
    /// Path of the deleted file.
    pub file_path: PathBuf,
    /// Size it had at deletion time.
    pub size_bytes: u64,
    /// When the deletion was recorded (UTC).
    pub deleted_at: DateTime<Utc>,
}

/// Summary snapshot of the ledger; never exposes the history array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Count of all deletion events ever recorded.
    pub total_files_deleted: u64,
    /// Monotonic sum of all recorded sizes.
    pub total_bytes_saved: u64,
    /// Human-readable form of `total_bytes_saved`.
    pub human_bytes_saved: String,
    /// When the ledger was first created.
    pub created_at: DateTime<Utc>,
    /// When the ledger was last mutated.
    pub last_updated: DateTime<Utc>,
}

/// Persisted document layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerState {
    total_files_deleted: u64,
    total_bytes_saved: u64,
    deletions: Vec<DeletionRecord>,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl LedgerState {
    fn fresh() -> Self {
        let now = Utc::now();
        Self {
            total_files_deleted: 0,
            total_bytes_saved: 0,
            deletions: Vec::new(),
            created_at: now,
            last_updated: now,
        }
    }
}

/// Ledger write failure.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger could not be persisted to stable storage.
    #[error("Failed to persist ledger at {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Durable, bounded-history counter of cumulative deletions.
///
/// Shared mutable state with a single-writer discipline: mutation goes
/// through `&mut self`, and every mutation persists the whole document
/// before returning. Callers sharing a ledger across threads wrap it in
/// a `Mutex`.
#[derive(Debug)]
pub struct DeletionLedger {
    path: PathBuf,
    state: LedgerState,
}

impl DeletionLedger {
    /// Open the ledger stored at `path`, creating zero-valued state when
    /// the file is missing. Corrupt or unreadable storage also yields a
    /// fresh ledger: corruption is recovered, never raised.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => state,
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "corrupt ledger, resetting to defaults"
                    );
                    LedgerState::fresh()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => LedgerState::fresh(),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "unreadable ledger, resetting to defaults"
                );
                LedgerState::fresh()
            }
        };

        Self { path, state }
    }

    /// Record one deletion: bump both totals, append a history entry,
    /// truncate history to the most recent [`HISTORY_CAP`] entries, and
    /// persist the full document before returning.
    pub fn record_deletion(
        &mut self,
        file_path: impl Into<PathBuf>,
        size_bytes: u64,
    ) -> Result<(), LedgerError> {
        let now = Utc::now();
        self.state.total_files_deleted += 1;
        self.state.total_bytes_saved += size_bytes;
        self.state.last_updated = now;
        self.state.deletions.push(DeletionRecord {
            file_path: file_path.into(),
            size_bytes,
            deleted_at: now,
        });

        if self.state.deletions.len() > HISTORY_CAP {
            let drop = self.state.deletions.len() - HISTORY_CAP;
            self.state.deletions.drain(..drop);
        }

        self.persist()
    }

    /// Summary snapshot without the internal history.
    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            total_files_deleted: self.state.total_files_deleted,
            total_bytes_saved: self.state.total_bytes_saved,
            human_bytes_saved: format_size(self.state.total_bytes_saved),
            created_at: self.state.created_at,
            last_updated: self.state.last_updated,
        }
    }

    /// Number of entries currently retained in history.
    pub fn history_len(&self) -> usize {
        self.state.deletions.len()
    }

    /// Where this ledger persists.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full document atomically: serialize to a sibling temp
    /// file, then rename over the target so a crash mid-write can never
    /// leave a half-written ledger behind.
    fn persist(&self) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(&self.state).map_err(|err| {
            LedgerError::Persist {
                path: self.path.clone(),
                source: std::io::Error::other(err),
            }
        })?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json).map_err(|source| LedgerError::Persist {
            path: self.path.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| LedgerError::Persist {
            path: self.path.clone(),
            source,
        })
    }
}
