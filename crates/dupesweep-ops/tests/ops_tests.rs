use std::fs;
use std::sync::Mutex;

use dupesweep_core::FileCatalog;
use dupesweep_ops::{DeleteError, DeletionLedger, delete_file};
use tempfile::TempDir;

#[test]
fn test_delete_twice_scenario() {
    // First call succeeds and credits 2048 bytes; the second fails with
    // NotFound and the ledger is unchanged.
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("dup.bin");
    fs::write(&target, vec![0u8; 2048]).unwrap();

    let mut catalog = FileCatalog::new(temp.path());
    catalog.accumulate(dupesweep_core::FileRecord::new(&target, 2048));
    let mut ledger = DeletionLedger::load(temp.path().join("stats.json"));

    let stats = delete_file(&target, &mut catalog, &mut ledger).unwrap();
    assert_eq!(stats.total_bytes_saved, 2048);

    let err = delete_file(&target, &mut catalog, &mut ledger).unwrap_err();
    assert!(matches!(err, DeleteError::NotFound { .. }));
    assert_eq!(ledger.stats().total_bytes_saved, 2048);
    assert_eq!(ledger.stats().total_files_deleted, 1);
}

#[test]
fn test_ledger_accumulates_across_sessions() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("stats.json");

    for session in 0..3 {
        let mut ledger = DeletionLedger::load(&store);
        let file = temp.path().join(format!("s{session}.bin"));
        fs::write(&file, vec![0u8; 100]).unwrap();
        let mut catalog = FileCatalog::new(temp.path());
        delete_file(&file, &mut catalog, &mut ledger).unwrap();
    }

    let ledger = DeletionLedger::load(&store);
    assert_eq!(ledger.stats().total_files_deleted, 3);
    assert_eq!(ledger.stats().total_bytes_saved, 300);
}

#[test]
fn test_serialized_writers_do_not_lose_updates() {
    // Single-writer discipline: a Mutex serializes concurrent delete
    // requests, so every recorded deletion lands in the totals.
    let temp = TempDir::new().unwrap();
    let ledger = Mutex::new(DeletionLedger::load(temp.path().join("stats.json")));

    std::thread::scope(|scope| {
        for t in 0..4 {
            let ledger = &ledger;
            scope.spawn(move || {
                for i in 0..25 {
                    let mut guard = ledger.lock().unwrap();
                    guard
                        .record_deletion(format!("/t{t}/file{i}"), 8)
                        .unwrap();
                }
            });
        }
    });

    let guard = ledger.lock().unwrap();
    assert_eq!(guard.stats().total_files_deleted, 100);
    assert_eq!(guard.stats().total_bytes_saved, 800);
}

#[test]
fn test_corrupted_then_recorded_ledger_recovers() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("stats.json");
    fs::write(&store, "???").unwrap();

    let mut ledger = DeletionLedger::load(&store);
    ledger.record_deletion("/x", 5).unwrap();

    // The rewritten store parses again.
    let reloaded = DeletionLedger::load(&store);
    assert_eq!(reloaded.stats().total_files_deleted, 1);
}
