//! File record and fingerprint types.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// BLAKE3 content fingerprint. Equal fingerprints imply equal content
/// with negligible collision probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub [u8; 32]);

impl Fingerprint {
    /// Create a new fingerprint from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the fingerprint as a hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// First `n` hex characters, for compact display and AI payloads.
    pub fn hex_prefix(&self, n: usize) -> String {
        let mut hex = self.to_hex();
        hex.truncate(n);
        hex
    }
}

/// A single regular file discovered by a scan.
///
/// Identity within a catalog is `path`; the other fields are extracted
/// metadata. `fingerprint` is `None` when hashing degraded (permission
/// error, mid-scan removal); `preview` is `None` for binary or unreadable
/// content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path to the file.
    pub path: PathBuf,

    /// File name without the directory part.
    pub name: CompactString,

    /// File extension including the leading dot, empty if none.
    pub extension: CompactString,

    /// Size in bytes.
    pub size: u64,

    /// Creation time (platform-dependent, best effort).
    pub created: Option<SystemTime>,

    /// Last modification time (best effort).
    pub modified: Option<SystemTime>,

    /// Content fingerprint, `None` when hashing failed.
    pub fingerprint: Option<Fingerprint>,

    /// Bounded text prefix of the file content, `None` for binary files.
    /// Exists only to feed the external near-duplicate classifier.
    pub preview: Option<String>,
}

impl FileRecord {
    /// Create a record for a path, deriving name and extension.
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = file_name_of(&path);
        let extension = extension_of(&path);
        Self {
            path,
            name,
            extension,
            size,
            created: None,
            modified: None,
            fingerprint: None,
            preview: None,
        }
    }

    /// Whether a fingerprint was successfully computed.
    pub fn has_fingerprint(&self) -> bool {
        self.fingerprint.is_some()
    }
}

fn file_name_of(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_default()
}

fn extension_of(path: &Path) -> CompactString {
    path.extension()
        .map(|e| CompactString::new(format!(".{}", e.to_string_lossy())))
        .unwrap_or_default()
}
