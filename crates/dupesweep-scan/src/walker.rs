//! Lazy enumeration of regular files under a root directory.

use std::fmt;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use tracing::warn;

use dupesweep_core::ScanError;

/// A lazy, finite, non-restartable sequence of regular-file paths.
///
/// Directories and symlinks are never yielded, and symlinks are never
/// followed. Unreadable entries are logged and skipped. The traversal
/// order is name-sorted, so deterministic within a run, but callers
/// should compare results by set membership rather than position.
pub struct FileEntries {
    inner: jwalk::DirEntryIter<((), ())>,
}

// The jwalk iterator is not Debug, so the derive is unavailable.
impl fmt::Debug for FileEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEntries").finish_non_exhaustive()
    }
}

impl Iterator for FileEntries {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            // file_type() does not follow symlinks, so a link to a file
            // is excluded here along with directories.
            if entry.file_type().is_file() {
                return Some(entry.path());
            }
        }
    }
}

/// Enumerate regular files under `root`.
///
/// `recursive = false` yields only direct children; `recursive = true`
/// yields every file in the subtree. Fails before producing any entries
/// with [`ScanError::NotFound`] if the root is absent and
/// [`ScanError::NotADirectory`] if it is a file.
pub fn walk(root: &Path, recursive: bool) -> Result<FileEntries, ScanError> {
    let root = root
        .canonicalize()
        .map_err(|e| ScanError::io(root, e))?;

    let metadata = std::fs::metadata(&root).map_err(|e| ScanError::io(&root, e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory { path: root });
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(&root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .min_depth(1)
        .max_depth(max_depth);

    Ok(FileEntries {
        inner: walker.into_iter(),
    })
}
