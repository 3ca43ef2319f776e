//! Command definitions
//!
//! Commands represent intentions to change the system state.

use serde::{Deserialize, Serialize};

use crate::domain::Entry;

/// Command to move money between two accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    /// Source account id
    pub from_account: String,
    /// Destination account id
    pub to_account: String,
    /// Amount to transfer (as string for precise decimal)
    pub amount: String,
}

impl TransferCommand {
    pub fn new(
        from_account: impl Into<String>,
        to_account: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            from_account: from_account.into(),
            to_account: to_account.into(),
            amount: amount.into(),
        }
    }
}

/// Result of a successful transfer: both committed entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResult {
    pub outgoing: Entry,
    pub incoming: Entry,
}
