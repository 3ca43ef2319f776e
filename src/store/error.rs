//! Ledger Store Errors
//!
//! Error types for ledger store operations.

/// Errors that can occur in the ledger store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Referenced account does not exist
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row failed to map back onto a domain type
    #[error("Invalid stored row: {0}")]
    InvalidRow(String),
}

impl StoreError {
    /// Check if this error means a referenced account is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::AccountNotFound(_))
    }
}
