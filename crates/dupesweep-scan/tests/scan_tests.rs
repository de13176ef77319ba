use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use dupesweep_scan::{ScanConfig, Scanner, walk};
use tempfile::TempDir;

fn create_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir(root.join("docs")).unwrap();
    fs::create_dir(root.join("photos")).unwrap();
    fs::create_dir(root.join("docs/archive")).unwrap();

    fs::write(root.join("readme.txt"), "top level").unwrap();
    fs::write(root.join("docs/a.txt"), "duplicate body").unwrap();
    fs::write(root.join("photos/b.txt"), "duplicate body").unwrap();
    fs::write(root.join("docs/archive/c.txt"), "unique body").unwrap();

    temp
}

#[test]
fn test_recursive_walk_matches_reachable_regular_files() {
    let temp = create_tree();
    let found: HashSet<PathBuf> = walk(temp.path(), true).unwrap().collect();

    assert_eq!(found.len(), 4);
    let canonical = temp.path().canonicalize().unwrap();
    assert!(found.contains(&canonical.join("readme.txt")));
    assert!(found.contains(&canonical.join("docs/a.txt")));
    assert!(found.contains(&canonical.join("photos/b.txt")));
    assert!(found.contains(&canonical.join("docs/archive/c.txt")));
}

#[test]
fn test_scan_groups_exact_duplicates_across_directories() {
    let temp = create_tree();
    let config = ScanConfig::new(temp.path()).with_recursive(true);
    let catalog = Scanner::new(config).scan().unwrap();

    assert_eq!(catalog.len(), 4);

    let groups = catalog.group_by_fingerprint();
    assert_eq!(groups.len(), 1);

    let names: HashSet<&str> = groups[0]
        .records
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, HashSet::from(["a.txt", "b.txt"]));
}

#[test]
fn test_rescan_replaces_catalog() {
    let temp = create_tree();
    let config = ScanConfig::new(temp.path()).with_recursive(true);

    let first = Scanner::new(config.clone()).scan().unwrap();
    assert_eq!(first.len(), 4);

    fs::remove_file(temp.path().join("readme.txt")).unwrap();
    let second = Scanner::new(config).scan().unwrap();
    assert_eq!(second.len(), 3);
}

#[test]
fn test_scan_survives_file_removed_between_walk_and_hash() {
    // Can't easily race the scanner, but an unreadable entry must not
    // abort the scan: here an empty directory and a normal file coexist
    // and the scan still completes over everything readable.
    let temp = create_tree();
    fs::create_dir(temp.path().join("empty")).unwrap();

    let config = ScanConfig::new(temp.path()).with_recursive(true);
    let catalog = Scanner::new(config).scan().unwrap();
    assert_eq!(catalog.len(), 4);
}

#[cfg(unix)]
#[test]
fn test_symlinked_subtree_is_not_scanned() {
    let temp = create_tree();
    let root = temp.path();
    std::os::unix::fs::symlink(root.join("docs"), root.join("docs_link")).unwrap();

    let config = ScanConfig::new(root).with_recursive(true);
    let catalog = Scanner::new(config).scan().unwrap();

    // Files under docs_link would double-count a.txt and c.txt.
    assert_eq!(catalog.len(), 4);
}
