//! payline Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use domain::{Account, Amount, AmountError, Balance, Currency, Direction, DomainError, Entry};
