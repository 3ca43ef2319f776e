//! Transfer Handler
//!
//! Validates and executes one transfer between two accounts as a single
//! atomic unit: either both entries and both balance updates commit, or
//! nothing does.

use sqlx::PgPool;

use crate::domain::{Account, Amount, DomainError, Entry};
use crate::error::AppError;
use crate::store::LedgerStore;

use super::{TransferCommand, TransferResult};

/// Handler for account-to-account transfers
pub struct TransferHandler {
    store: LedgerStore,
}

impl TransferHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            store: LedgerStore::new(pool),
        }
    }

    /// Execute the transfer command.
    ///
    /// Locks both accounts in ascending id order, stages the outgoing and
    /// incoming entries, checks funds, mutates both balances, and commits.
    /// Any failure before commit rolls the whole transaction back: no
    /// entry or balance change ever becomes visible on its own.
    pub async fn execute(&self, command: TransferCommand) -> Result<TransferResult, AppError> {
        let amount: Amount = command
            .amount
            .parse()
            .map_err(|e: crate::domain::AmountError| {
                AppError::Domain(DomainError::validation("amount", e.to_string()))
            })?;

        let mut tx = self.store.begin().await?;

        // Ascending-id lock order; two transfers on the same pair in
        // opposite directions contend on the same first lock.
        let locked = tx
            .lock_accounts_for_update(&[&command.from_account, &command.to_account])
            .await?;

        let source = find_locked(&locked, &command.from_account)?;
        let destination = find_locked(&locked, &command.to_account)?;

        // Staging order is fixed: entry-shape errors surface before the
        // funds check even when both would fail.
        let outgoing = Entry::outgoing(source, destination, amount.clone())?;
        tx.insert_entry(&outgoing).await?;

        let incoming = Entry::incoming(destination, source, amount.clone())?;
        tx.insert_entry(&incoming).await?;

        if !source.balance().is_sufficient_for(&amount) {
            tracing::info!(
                from = %command.from_account,
                to = %command.to_account,
                amount = %amount,
                "transfer rejected: insufficient funds"
            );
            return Err(DomainError::insufficient_funds(
                amount.value(),
                source.balance().value(),
            )
            .into());
        }

        let new_source_balance = source
            .balance()
            .debit(&amount)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let new_destination_balance = destination
            .balance()
            .credit(&amount)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        tx.update_balance(source.id(), &new_source_balance).await?;
        tx.update_balance(destination.id(), &new_destination_balance)
            .await?;

        tx.commit().await?;

        tracing::info!(
            from = %command.from_account,
            to = %command.to_account,
            amount = %amount,
            "transfer committed"
        );

        Ok(TransferResult { outgoing, incoming })
    }
}

/// Look up a locked account by id.
///
/// `lock_accounts_for_update` returns rows in lock (ascending id) order,
/// not request order, and collapses duplicate ids into one row.
fn find_locked<'a>(locked: &'a [Account], id: &str) -> Result<&'a Account, AppError> {
    locked
        .iter()
        .find(|account| account.id() == id)
        .ok_or_else(|| AppError::Internal(format!("locked account {} missing", id)))
}
