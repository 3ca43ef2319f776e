//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

/// Business rule violations raised while building or executing a transfer.
///
/// These errors are independent of the web/storage layers. Every one of
/// them aborts the enclosing ledger transaction before any balance change
/// becomes visible.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An entry violates one of its invariants; carries the offending field
    #[error("Validation failed on '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    /// Source balance is smaller than the requested amount
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },
}

impl DomainError {
    /// Create a validation error for a named field
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Create an insufficient funds error
    pub fn insufficient_funds(required: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }

    /// The field an error is reported against, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::InsufficientFunds { .. } => None,
        }
    }
}
