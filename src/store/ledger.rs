//! Ledger Store
//!
//! Persistence layer for accounts and entries on PostgreSQL. The write path
//! goes through [`LedgerTransaction`]: row-level `SELECT ... FOR UPDATE`
//! locks acquired in ascending account-id order, staged writes, and an
//! all-or-nothing commit. Dropping a transaction without committing rolls
//! every staged write back, including on early returns and panics.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::{Account, Amount, Balance, Direction, Entry};

use super::StoreError;

/// Account row as it comes back from PostgreSQL
type AccountRow = (String, String, Decimal, String);

/// Entry row as it comes back from PostgreSQL
type EntryRow = (
    Uuid,
    String,
    String,
    Option<String>,
    Option<String>,
    Decimal,
    DateTime<Utc>,
);

/// Ledger Store over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct LedgerStore {
    pool: PgPool,
}

impl LedgerStore {
    /// Create a new LedgerStore with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a scoped transaction for a transfer
    pub async fn begin(&self) -> Result<LedgerTransaction, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(LedgerTransaction { tx })
    }

    /// Fetch one account without locking it (read-only path)
    pub async fn get_account(&self, id: &str) -> Result<Option<Account>, StoreError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT id, owner, balance, currency
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(account_from_row).transpose()
    }

    /// List all accounts, ordered by id
    pub async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let rows: Vec<AccountRow> = sqlx::query_as(
            r#"
            SELECT id, owner, balance, currency
            FROM accounts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(account_from_row).collect()
    }

    /// List all entries, oldest first
    pub async fn list_entries(&self) -> Result<Vec<Entry>, StoreError> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            r#"
            SELECT id, account_id, direction, from_account_id, to_account_id,
                   amount, created_at
            FROM entries
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(entry_from_row).collect()
    }
}

/// A scoped unit of work against the ledger.
///
/// All reads and writes performed through it share one database
/// transaction; nothing becomes visible to other connections until
/// [`LedgerTransaction::commit`].
#[derive(Debug)]
pub struct LedgerTransaction {
    tx: Transaction<'static, Postgres>,
}

impl LedgerTransaction {
    /// Acquire exclusive row locks on the given accounts.
    ///
    /// Ids are sorted ascending (and deduplicated) before locking, so any
    /// two transfers touching the same account pair acquire their locks in
    /// the same global order and can never deadlock against each other.
    /// Blocks until every lock is held; locks live until commit or drop.
    ///
    /// # Errors
    /// `StoreError::AccountNotFound` if any id has no account row. The
    /// enclosing transaction is left to roll back with no partial effect.
    pub async fn lock_accounts_for_update(
        &mut self,
        ids: &[&str],
    ) -> Result<Vec<Account>, StoreError> {
        let mut ordered: Vec<&str> = ids.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let mut accounts = Vec::with_capacity(ordered.len());

        for id in ordered {
            let row: Option<AccountRow> = sqlx::query_as(
                r#"
                SELECT id, owner, balance, currency
                FROM accounts
                WHERE id = $1
                FOR UPDATE
                "#,
            )
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;

            let row = row.ok_or_else(|| StoreError::AccountNotFound(id.to_string()))?;
            accounts.push(account_from_row(row)?);
        }

        Ok(accounts)
    }

    /// Stage an entry insertion.
    ///
    /// The direction sum type is flattened into the stored shape: a text
    /// label plus two nullable counterparty columns, of which exactly one
    /// is populated.
    pub async fn insert_entry(&mut self, entry: &Entry) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO entries
                (id, account_id, direction, from_account_id, to_account_id,
                 amount, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id())
        .bind(entry.account_id())
        .bind(entry.direction().as_str())
        .bind(entry.direction().from_account())
        .bind(entry.direction().to_account())
        .bind(entry.amount().value())
        .bind(entry.created_at())
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    /// Stage a balance update for a locked account
    pub async fn update_balance(
        &mut self,
        account_id: &str,
        balance: &Balance,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET balance = $1
            WHERE id = $2
            "#,
        )
        .bind(balance.value())
        .bind(account_id)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() != 1 {
            return Err(StoreError::AccountNotFound(account_id.to_string()));
        }

        Ok(())
    }

    /// Make all staged writes visible atomically and release the row locks
    pub async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Explicitly discard all staged writes.
    ///
    /// Dropping the transaction has the same effect; this exists for call
    /// sites that want the rollback outcome surfaced as a `Result`.
    pub async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}

fn account_from_row(row: AccountRow) -> Result<Account, StoreError> {
    let (id, owner, balance, currency) = row;

    let currency = currency
        .parse()
        .map_err(|e| StoreError::InvalidRow(format!("account {}: {}", id, e)))?;

    let balance = Balance::new(balance)
        .map_err(|e| StoreError::InvalidRow(format!("account {}: {}", id, e)))?;

    Ok(Account::new(id, owner, balance, currency))
}

fn entry_from_row(row: EntryRow) -> Result<Entry, StoreError> {
    let (id, account_id, direction, from_account, to_account, amount, created_at) = row;

    let direction = match (direction.as_str(), from_account, to_account) {
        ("outgoing", None, Some(to_account)) => Direction::Outgoing { to_account },
        ("incoming", Some(from_account), None) => Direction::Incoming { from_account },
        (label, _, _) => {
            return Err(StoreError::InvalidRow(format!(
                "entry {}: direction '{}' does not match its counterparty columns",
                id, label
            )));
        }
    };

    let amount = Amount::new(amount)
        .map_err(|e| StoreError::InvalidRow(format!("entry {}: {}", id, e)))?;

    Ok(Entry::from_db_state(id, account_id, direction, amount, created_at))
}
