//! Recursive directory size aggregation with an exclusion policy.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use dupesweep_core::{ScanError, format_size};

/// Directory names that are never traversed. These are cloud/mount
/// points whose contents are network-backed or would be double-counted.
pub const DEFAULT_DENYLIST: [&str; 2] = ["CloudStorage", "Mobile Documents"];

/// Configuration for directory size analysis.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct SizeConfig {
    /// Directory names excluded from traversal.
    #[builder(default = "default_denylist()")]
    #[serde(default = "default_denylist")]
    pub denylist: Vec<String>,
}

fn default_denylist() -> Vec<String> {
    DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect()
}

impl SizeConfig {
    /// Create a new config builder.
    pub fn builder() -> SizeConfigBuilder {
        SizeConfigBuilder::default()
    }
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            denylist: default_denylist(),
        }
    }
}

/// Size of one direct child directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntrySize {
    /// Directory name.
    pub name: CompactString,
    /// Absolute path.
    pub path: PathBuf,
    /// Aggregated size in bytes; 0 when skipped.
    pub size_bytes: u64,
    /// Human-readable size.
    pub human_size: String,
    /// Set when the directory matched the denylist and was not traversed.
    pub skipped: bool,
}

/// Size breakdown of one directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorySummary {
    /// The directory summarized.
    pub path: PathBuf,
    /// Total bytes under `path`, exclusions applied.
    pub total_size_bytes: u64,
    /// Human-readable total.
    pub human_size: String,
    /// Number of direct child directories.
    pub subdirectory_count: usize,
    /// Direct children, sorted descending by size (stable on ties).
    pub subdirectories: Vec<DirectoryEntrySize>,
}

/// Computes subtree byte totals independently of any scan.
pub struct DirSizeAnalyzer {
    config: SizeConfig,
}

impl DirSizeAnalyzer {
    /// Create an analyzer with the default denylist.
    pub fn new() -> Self {
        Self {
            config: SizeConfig::default(),
        }
    }

    /// Create an analyzer with a custom config.
    pub fn with_config(config: SizeConfig) -> Self {
        Self { config }
    }

    /// Summarize a directory: total size plus per-child breakdown.
    ///
    /// Symlink entries are skipped entirely and denylisted directories
    /// are reported with size 0 and a skipped marker. Per-entry stat
    /// errors contribute zero; a permission error at the root itself
    /// fails the call.
    pub fn summarize(&self, directory: &Path) -> Result<DirectorySummary, ScanError> {
        let metadata = std::fs::metadata(directory)
            .map_err(|e| ScanError::io(directory, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory {
                path: directory.to_path_buf(),
            });
        }

        let entries =
            std::fs::read_dir(directory).map_err(|e| ScanError::io(directory, e))?;

        let mut total: u64 = 0;
        let mut subdirectories = Vec::new();

        for entry in entries {
            let Ok(entry) = entry else { continue };
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_symlink() {
                continue;
            }

            if file_type.is_file() {
                total += entry.metadata().map(|m| m.len()).unwrap_or(0);
            } else if file_type.is_dir() {
                let name = CompactString::new(entry.file_name().to_string_lossy());
                let path = entry.path();

                if self.is_denylisted(&name) {
                    debug!(path = %path.display(), "denylisted directory, not traversed");
                    subdirectories.push(DirectoryEntrySize {
                        name,
                        path,
                        size_bytes: 0,
                        human_size: format_size(0),
                        skipped: true,
                    });
                    continue;
                }

                let size_bytes = self.directory_size(&path);
                total += size_bytes;
                subdirectories.push(DirectoryEntrySize {
                    name,
                    path,
                    size_bytes,
                    human_size: format_size(size_bytes),
                    skipped: false,
                });
            }
        }

        // Stable sort keeps enumeration order as the tie-break.
        subdirectories.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));

        Ok(DirectorySummary {
            path: directory.to_path_buf(),
            total_size_bytes: total,
            human_size: format_size(total),
            subdirectory_count: subdirectories.len(),
            subdirectories,
        })
    }

    /// Recursive byte total for one subtree. All errors below the root
    /// are swallowed as zero contribution so one inaccessible branch
    /// never poisons the aggregate.
    fn directory_size(&self, path: &Path) -> u64 {
        let Ok(entries) = std::fs::read_dir(path) else {
            return 0;
        };

        let mut total = 0;
        for entry in entries {
            let Ok(entry) = entry else { continue };
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_symlink() {
                continue;
            }

            if file_type.is_file() {
                total += entry.metadata().map(|m| m.len()).unwrap_or(0);
            } else if file_type.is_dir() {
                let name = entry.file_name();
                if self.is_denylisted(&name.to_string_lossy()) {
                    continue;
                }
                total += self.directory_size(&entry.path());
            }
        }
        total
    }

    fn is_denylisted(&self, name: &str) -> bool {
        self.config.denylist.iter().any(|d| d == name)
    }
}

impl Default for DirSizeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
