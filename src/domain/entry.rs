//! Ledger entry
//!
//! An entry records one side of a transfer against one account. Entries are
//! created in pairs (one outgoing, one incoming) by the transfer engine and
//! are immutable once committed.
//!
//! The direction carries the counterparty reference inside the variant, so
//! "exactly one counterparty, matching the direction" holds by construction
//! rather than by a runtime check on two nullable fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Account, Amount, DomainError};

/// Direction of an entry, with the counterparty it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "lowercase")]
pub enum Direction {
    /// Money leaving the subject account towards `to_account`
    Outgoing { to_account: String },
    /// Money arriving at the subject account from `from_account`
    Incoming { from_account: String },
}

impl Direction {
    /// Direction label as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Outgoing { .. } => "outgoing",
            Direction::Incoming { .. } => "incoming",
        }
    }

    /// The account on the other side of the transfer
    pub fn counterparty(&self) -> &str {
        match self {
            Direction::Outgoing { to_account } => to_account,
            Direction::Incoming { from_account } => from_account,
        }
    }

    /// Destination account id, set only for outgoing entries
    pub fn to_account(&self) -> Option<&str> {
        match self {
            Direction::Outgoing { to_account } => Some(to_account),
            Direction::Incoming { .. } => None,
        }
    }

    /// Source account id, set only for incoming entries
    pub fn from_account(&self) -> Option<&str> {
        match self {
            Direction::Incoming { from_account } => Some(from_account),
            Direction::Outgoing { .. } => None,
        }
    }
}

/// One immutable side of a committed transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    id: Uuid,
    account_id: String,
    #[serde(flatten)]
    direction: Direction,
    amount: Amount,
    created_at: DateTime<Utc>,
}

impl Entry {
    /// Build the outgoing half of a transfer: subject is the source account,
    /// the counterparty is the destination.
    pub fn outgoing(
        subject: &Account,
        destination: &Account,
        amount: Amount,
    ) -> Result<Self, DomainError> {
        Self::validate_accounts(subject, destination)?;

        Ok(Self {
            id: Uuid::new_v4(),
            account_id: subject.id().to_string(),
            direction: Direction::Outgoing {
                to_account: destination.id().to_string(),
            },
            amount,
            created_at: Utc::now(),
        })
    }

    /// Build the incoming half of a transfer: subject is the destination
    /// account, the counterparty is the source.
    pub fn incoming(
        subject: &Account,
        source: &Account,
        amount: Amount,
    ) -> Result<Self, DomainError> {
        Self::validate_accounts(subject, source)?;

        Ok(Self {
            id: Uuid::new_v4(),
            account_id: subject.id().to_string(),
            direction: Direction::Incoming {
                from_account: source.id().to_string(),
            },
            amount,
            created_at: Utc::now(),
        })
    }

    /// Check the account-pair invariants shared by both directions.
    ///
    /// Pure and side-effect free; checking the same pair twice yields the
    /// same result. The positive-amount and counterparty-presence
    /// invariants are enforced structurally by `Amount` and `Direction`.
    pub fn validate_accounts(
        subject: &Account,
        counterparty: &Account,
    ) -> Result<(), DomainError> {
        if subject.currency() != counterparty.currency() {
            return Err(DomainError::validation(
                "currency",
                format!(
                    "account currencies must match ({} vs {})",
                    subject.currency(),
                    counterparty.currency()
                ),
            ));
        }

        if subject.id() == counterparty.id() {
            return Err(DomainError::validation(
                "account",
                "source and destination accounts can not be the same",
            ));
        }

        Ok(())
    }

    /// Rehydrate an entry from its stored row.
    ///
    /// Skips the account-pair checks: committed rows already passed them
    /// and the referenced accounts may have changed since.
    pub fn from_db_state(
        id: Uuid,
        account_id: String,
        direction: Direction,
        amount: Amount,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_id,
            direction,
            amount,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The account this entry is recorded against
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn direction(&self) -> &Direction {
        &self.direction
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_outgoing(&self) -> bool {
        matches!(self.direction, Direction::Outgoing { .. })
    }
}
