//! Interface to the external near-duplicate classifier.
//!
//! The classifier is an opaque, best-effort collaborator: this module
//! owns payload assembly and response parsing, while the inference
//! transport is a [`ClassifierBackend`] implemented elsewhere. Failures
//! on either side degrade to "no AI-detected duplicates" and never
//! affect exact-duplicate results.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use dupesweep_core::{FileRecord, format_size};

/// Maximum number of preview characters sent per file.
pub const PREVIEW_LIMIT: usize = 500;

/// Number of fingerprint hex characters sent per file.
pub const FINGERPRINT_PREFIX_LEN: usize = 16;

/// One file as presented to the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    /// Position of the file in the scanned list; group assignments
    /// reference these indices.
    pub index: usize,
    /// File name.
    pub name: String,
    /// Absolute path.
    pub path: String,
    /// Human-readable size.
    pub size: String,
    /// Fingerprint hex prefix, or "N/A" when hashing degraded.
    pub fingerprint: String,
    /// Bounded content preview, empty for binary files.
    pub content_preview: String,
}

/// A group of files the classifier considers duplicates.
///
/// `confidence`, `match_type` and `recommendation` are passed through
/// as opaque strings; the classifier's vocabulary is not validated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateAssignment {
    /// Indices into the submitted summary list.
    #[serde(default)]
    pub file_indices: Vec<usize>,
    #[serde(default)]
    pub confidence: String,
    #[serde(default)]
    pub match_type: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub recommendation: String,
}

/// Full classifier verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierReport {
    /// Duplicate groups found, possibly empty.
    #[serde(default)]
    pub duplicate_groups: Vec<DuplicateAssignment>,
    /// Free-form overall summary.
    #[serde(default)]
    pub summary: String,
}

impl ClassifierReport {
    /// The degraded "nothing found" report.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether any groups were assigned.
    pub fn has_duplicates(&self) -> bool {
        !self.duplicate_groups.is_empty()
    }
}

/// Transport to the inference service. Implementations live outside
/// this repository.
pub trait ClassifierBackend {
    /// Submit a prompt, returning the raw response text.
    fn complete(&self, prompt: &str) -> Result<String, ClassifierError>;
}

/// Classifier transport failure.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier backend error: {message}")]
    Backend { message: String },
}

/// Build the ordered summary payload from catalog records.
pub fn build_file_summaries(records: &[FileRecord]) -> Vec<FileSummary> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| FileSummary {
            index,
            name: record.name.to_string(),
            path: record.path.display().to_string(),
            size: format_size(record.size),
            fingerprint: record
                .fingerprint
                .map(|fp| fp.hex_prefix(FINGERPRINT_PREFIX_LEN))
                .unwrap_or_else(|| "N/A".to_string()),
            content_preview: record
                .preview
                .as_deref()
                .map(truncate_preview)
                .unwrap_or_default(),
        })
        .collect()
}

fn truncate_preview(preview: &str) -> String {
    preview.chars().take(PREVIEW_LIMIT).collect()
}

/// Assemble the analysis prompt for a batch of file summaries.
pub fn build_prompt(summaries: &[FileSummary]) -> String {
    let payload = serde_json::to_string_pretty(summaries).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You are analyzing files to detect duplicates. Files may have different \
names but contain the same or very similar content.\n\n\
Files to analyze:\n{payload}\n\n\
Identify exact duplicates (identical content), near duplicates (very similar \
content with minor differences), and potential duplicates (same topic or \
purpose but different content).\n\n\
Return only JSON with this structure:\n\
{{\n\
  \"duplicate_groups\": [\n\
    {{\n\
      \"file_indices\": [0, 1],\n\
      \"confidence\": \"high|medium|low\",\n\
      \"match_type\": \"exact|near|potential\",\n\
      \"reason\": \"why these files match\",\n\
      \"recommendation\": \"keep|review|delete\"\n\
    }}\n\
  ],\n\
  \"summary\": \"overall summary of findings\"\n\
}}"
    )
}

/// Parse a classifier response. Malformed input degrades to an empty
/// report rather than propagating an error.
pub fn parse_response(response: &str) -> ClassifierReport {
    match serde_json::from_str(response) {
        Ok(report) => report,
        Err(err) => {
            warn!(error = %err, "unparseable classifier response, degrading to empty report");
            ClassifierReport::empty()
        }
    }
}

/// Drives one classification round-trip against a backend.
pub struct DuplicateClassifier<B> {
    backend: B,
}

impl<B: ClassifierBackend> DuplicateClassifier<B> {
    /// Wrap a transport backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Classify a set of records. Backend failures degrade to an empty
    /// report, logged; exact-duplicate grouping is unaffected either way.
    pub fn classify(&self, records: &[FileRecord]) -> ClassifierReport {
        let summaries = build_file_summaries(records);
        let prompt = build_prompt(&summaries);
        match self.backend.complete(&prompt) {
            Ok(response) => parse_response(&response),
            Err(err) => {
                warn!(error = %err, "classifier backend failed, degrading to empty report");
                ClassifierReport::empty()
            }
        }
    }
}
