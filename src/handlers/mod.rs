//! Command Handlers module
//!
//! Handlers that orchestrate business operations against the ledger store.

mod commands;
mod transfer_handler;

pub use commands::{TransferCommand, TransferResult};
pub use transfer_handler::TransferHandler;
