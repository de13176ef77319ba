//! Scan orchestration: walk, extract metadata, fingerprint, catalog.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use dupesweep_core::{FileCatalog, FileRecord, ScanConfig, ScanError, ScanWarning};

use crate::fingerprint::fingerprint_file;
use crate::walker;

/// Scans a directory into a [`FileCatalog`].
///
/// Each scan produces a brand-new catalog; callers replace the previous
/// one wholesale. A scan that fails at the root produces no catalog at
/// all, so partial scans are never committed.
pub struct Scanner {
    config: ScanConfig,
}

/// Per-file outcome of the parallel extraction phase.
enum FileOutcome {
    Record(FileRecord, Option<ScanWarning>),
    Skipped(ScanWarning),
}

impl Scanner {
    /// Create a scanner for the given configuration.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Walk the configured root and build the catalog.
    ///
    /// Root-level structural failures (absent root, root is a file,
    /// permission refused) abort immediately. Per-entry failures degrade
    /// to warnings on the catalog and traversal continues.
    pub fn scan(&self) -> Result<FileCatalog, ScanError> {
        let paths: Vec<PathBuf> =
            walker::walk(&self.config.root, self.config.recursive)?.collect();

        debug!(
            root = %self.config.root.display(),
            files = paths.len(),
            recursive = self.config.recursive,
            "enumerated scan entries"
        );

        // Fingerprinting is parallelized across files; each file's
        // read+hash stays within one task, and collect() preserves
        // discovery order.
        let outcomes: Vec<FileOutcome> = paths
            .par_iter()
            .map(|path| self.process_file(path))
            .collect();

        let mut catalog = FileCatalog::new(&self.config.root);
        for outcome in outcomes {
            match outcome {
                FileOutcome::Record(record, warning) => {
                    catalog.accumulate(record);
                    if let Some(w) = warning {
                        catalog.warn(w);
                    }
                }
                FileOutcome::Skipped(warning) => catalog.warn(warning),
            }
        }

        Ok(catalog)
    }

    fn process_file(&self, path: &Path) -> FileOutcome {
        let metadata = match std::fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping file, stat failed");
                return FileOutcome::Skipped(ScanWarning::metadata_error(path, &err));
            }
        };

        let mut record = FileRecord::new(path, metadata.len());
        record.created = metadata.created().ok();
        record.modified = metadata.modified().ok();
        record.preview = read_preview(path, self.config.preview_bytes);

        let mut warning = None;
        if metadata.len() >= self.config.fingerprint_min_size {
            record.fingerprint = fingerprint_file(path);
            if record.fingerprint.is_none() {
                warning = Some(ScanWarning::hash_error(path));
            }
        }

        FileOutcome::Record(record, warning)
    }
}

/// Read a bounded UTF-8 text prefix of a file.
///
/// A final truncated code point is trimmed; any other decode failure
/// marks the file as binary (`None`). Read errors also yield `None`
/// rather than aborting the scan.
fn read_preview(path: &Path, max_bytes: usize) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut buffer = Vec::with_capacity(max_bytes.min(8 * 1024));
    file.take(max_bytes as u64).read_to_end(&mut buffer).ok()?;

    match std::str::from_utf8(&buffer) {
        Ok(text) => Some(text.to_string()),
        Err(err) if err.error_len().is_none() => {
            // Valid text cut mid-code-point at the read boundary.
            let valid = &buffer[..err.valid_up_to()];
            Some(String::from_utf8_lossy(valid).into_owned())
        }
        Err(_) => None,
    }
}
