//! Analysis engines for dupesweep.
//!
//! - **Directory sizes** - recursively aggregate subtree byte totals
//!   with symlink and cloud-mount exclusions
//! - **Near-duplicate classification** - payload assembly and response
//!   parsing for the external AI classifier
//!
//! ```rust,ignore
//! use dupesweep_analyze::DirSizeAnalyzer;
//!
//! let summary = DirSizeAnalyzer::new().summarize("/home/user".as_ref())?;
//! println!("{} in {} subdirectories", summary.human_size, summary.subdirectory_count);
//! for dir in &summary.subdirectories {
//!     println!("{:>12} {}{}", dir.human_size, dir.name, if dir.skipped { " (skipped)" } else { "" });
//! }
//! ```

mod classifier;
mod sizes;

pub use classifier::{
    ClassifierBackend, ClassifierError, ClassifierReport, DuplicateAssignment,
    DuplicateClassifier, FINGERPRINT_PREFIX_LEN, FileSummary, PREVIEW_LIMIT,
    build_file_summaries, build_prompt, parse_response,
};
pub use sizes::{
    DEFAULT_DENYLIST, DirSizeAnalyzer, DirectoryEntrySize, DirectorySummary, SizeConfig,
    SizeConfigBuilder,
};

// Re-export core types
pub use dupesweep_core::{FileCatalog, FileRecord, ScanError};
