//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default number of bytes read for the text preview.
pub const DEFAULT_PREVIEW_BYTES: usize = 10 * 1024;

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Descend into subdirectories; otherwise only direct children are
    /// scanned.
    #[builder(default = "false")]
    #[serde(default)]
    pub recursive: bool,

    /// Number of bytes read for the text preview.
    #[builder(default = "DEFAULT_PREVIEW_BYTES")]
    #[serde(default = "default_preview_bytes")]
    pub preview_bytes: usize,

    /// Minimum file size to fingerprint (0 = fingerprint everything).
    #[builder(default = "0")]
    #[serde(default)]
    pub fingerprint_min_size: u64,
}

fn default_preview_bytes() -> usize {
    DEFAULT_PREVIEW_BYTES
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.root {
            Some(root) if root.as_os_str().is_empty() => {
                Err("Root path cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Root path is required".to_string()),
        }
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            preview_bytes: DEFAULT_PREVIEW_BYTES,
            fingerprint_min_size: 0,
        }
    }

    /// Same config with recursion toggled.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
