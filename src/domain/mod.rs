//! Domain module
//!
//! Core domain types and business logic.

pub mod account;
pub mod amount;
pub mod currency;
pub mod entry;
pub mod error;

pub use account::Account;
pub use amount::{Amount, AmountError, Balance};
pub use currency::{Currency, CurrencyError};
pub use entry::{Direction, Entry};
pub use error::DomainError;
