//! Ledger Store module
//!
//! Persistence layer for accounts and entries on PostgreSQL, with row
//! locking and atomic multi-write commit.

mod error;
mod ledger;

pub use error::StoreError;
pub use ledger::{LedgerStore, LedgerTransaction};
