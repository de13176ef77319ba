//! Deletion operations for dupesweep.
//!
//! Provides the durable [`DeletionLedger`] (cumulative count and bytes
//! saved across sessions, bounded visible history) and the
//! [`delete_file`] operation that removes a file physically and keeps
//! catalog and ledger consistent.

mod delete;
mod ledger;

pub use delete::{DeleteError, delete_file};
pub use ledger::{DeletionLedger, DeletionRecord, HISTORY_CAP, LedgerError, LedgerStats};
