//! Account record
//!
//! A holding account: an externally assigned string identifier, a free-text
//! owner label, a balance and a single currency. Accounts are created by
//! seeds or operators, never by the transfer path; the engine only reads
//! and mutates them while holding their row lock.

use serde::{Deserialize, Serialize};

use super::{Balance, Currency};

/// An individual account that holds money in one currency for an owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Globally unique identifier (primary key)
    id: String,

    /// Owner label, not unique
    owner: String,

    /// Current committed balance
    balance: Balance,

    /// Currency of the account
    currency: Currency,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        owner: impl Into<String>,
        balance: Balance,
        currency: Currency,
    ) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            balance,
            currency,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> &Balance {
        &self.balance
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}
