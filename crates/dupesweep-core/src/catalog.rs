//! In-memory catalog of one scan's file records.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;
use crate::record::{FileRecord, Fingerprint};

/// A set of ≥2 records sharing one content fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintGroup {
    /// Fingerprint shared by every record in the group.
    pub fingerprint: Fingerprint,
    /// Records in discovery order.
    pub records: Vec<FileRecord>,
}

impl FingerprintGroup {
    /// Number of files in this group.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Bytes reclaimable by keeping one copy.
    pub fn wasted_bytes(&self) -> u64 {
        self.records
            .iter()
            .skip(1)
            .map(|r| r.size)
            .sum()
    }
}

/// All records produced by a single completed scan.
///
/// A new scan replaces the previous catalog wholesale; there is no merge
/// path. At most one scan should feed a catalog instance at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCatalog {
    /// Root path the scan covered.
    pub root: PathBuf,

    /// When the scan completed.
    pub scanned_at: SystemTime,

    records: Vec<FileRecord>,
    warnings: Vec<ScanWarning>,
}

impl FileCatalog {
    /// Create an empty catalog for a scan root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scanned_at: SystemTime::now(),
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Append a record to the catalog.
    pub fn accumulate(&mut self, record: FileRecord) {
        self.records.push(record);
    }

    /// Record a non-fatal warning encountered during the scan.
    pub fn warn(&mut self, warning: ScanWarning) {
        self.warnings.push(warning);
    }

    /// Records in discovery order.
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Warnings collected during the scan.
    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all record sizes.
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }

    /// Group records by content fingerprint, keeping only groups with at
    /// least two members. Records without a fingerprint never appear in
    /// any group. Group and member order follow discovery order.
    pub fn group_by_fingerprint(&self) -> Vec<FingerprintGroup> {
        let mut groups: IndexMap<Fingerprint, Vec<FileRecord>> = IndexMap::new();
        for record in &self.records {
            if let Some(fp) = record.fingerprint {
                groups.entry(fp).or_default().push(record.clone());
            }
        }

        groups
            .into_iter()
            .filter(|(_, records)| records.len() >= 2)
            .map(|(fingerprint, records)| FingerprintGroup {
                fingerprint,
                records,
            })
            .collect()
    }

    /// Remove at most one record matching `path`. Removing an absent path
    /// is a no-op; returns the removed record when there was one.
    pub fn remove_by_path(&mut self, path: &Path) -> Option<FileRecord> {
        let idx = self.records.iter().position(|r| r.path == path)?;
        Some(self.records.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, size: u64, fp: Option<u8>) -> FileRecord {
        let mut r = FileRecord::new(path, size);
        r.fingerprint = fp.map(|b| Fingerprint::new([b; 32]));
        r
    }

    #[test]
    fn test_grouping_requires_two_members() {
        let mut catalog = FileCatalog::new("/scan");
        catalog.accumulate(record("/scan/a.txt", 1, Some(0x01)));
        catalog.accumulate(record("/scan/b.txt", 1, Some(0x01)));
        catalog.accumulate(record("/scan/c.txt", 1, Some(0x02)));

        let groups = catalog.group_by_fingerprint();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].count(), 2);
        assert_eq!(groups[0].records[0].name, "a.txt");
        assert_eq!(groups[0].records[1].name, "b.txt");
    }

    #[test]
    fn test_grouping_excludes_fingerprintless_records() {
        let mut catalog = FileCatalog::new("/scan");
        catalog.accumulate(record("/scan/a.txt", 1, None));
        catalog.accumulate(record("/scan/b.txt", 1, None));

        assert!(catalog.group_by_fingerprint().is_empty());
    }

    #[test]
    fn test_grouping_discovery_order() {
        let mut catalog = FileCatalog::new("/scan");
        catalog.accumulate(record("/scan/z.txt", 1, Some(0x02)));
        catalog.accumulate(record("/scan/y.txt", 1, Some(0x01)));
        catalog.accumulate(record("/scan/x.txt", 1, Some(0x02)));
        catalog.accumulate(record("/scan/w.txt", 1, Some(0x01)));

        let groups = catalog.group_by_fingerprint();
        assert_eq!(groups.len(), 2);
        // First fingerprint discovered comes first.
        assert_eq!(groups[0].fingerprint, Fingerprint::new([0x02; 32]));
        assert_eq!(groups[1].fingerprint, Fingerprint::new([0x01; 32]));
    }

    #[test]
    fn test_remove_by_path_is_idempotent() {
        let mut catalog = FileCatalog::new("/scan");
        catalog.accumulate(record("/scan/a.txt", 7, None));

        let removed = catalog.remove_by_path(Path::new("/scan/a.txt"));
        assert_eq!(removed.unwrap().size, 7);
        assert!(catalog.is_empty());

        // Second removal of the same path is a no-op.
        assert!(catalog.remove_by_path(Path::new("/scan/a.txt")).is_none());
    }

    #[test]
    fn test_wasted_bytes() {
        let group = FingerprintGroup {
            fingerprint: Fingerprint::new([0xaa; 32]),
            records: vec![
                record("/a", 100, Some(0xaa)),
                record("/b", 100, Some(0xaa)),
                record("/c", 100, Some(0xaa)),
            ],
        };
        assert_eq!(group.wasted_bytes(), 200);
    }

    #[test]
    fn test_scanned_at_is_stamped_at_construction() {
        let before = SystemTime::now();
        let catalog = FileCatalog::new("/scan");
        let after = SystemTime::now();

        assert!(catalog.scanned_at >= before);
        assert!(catalog.scanned_at <= after);
    }

    #[test]
    fn test_total_size() {
        let mut catalog = FileCatalog::new("/scan");
        catalog.accumulate(record("/scan/a", 10, None));
        catalog.accumulate(record("/scan/b", 32, None));
        assert_eq!(catalog.total_size(), 42);
        assert_eq!(catalog.len(), 2);
    }
}
