//! Common test utilities

use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

/// Connect to the test database and make sure the schema exists.
///
/// Tests run in parallel against one database, so nothing is truncated
/// here; each test works with uniquely named accounts instead.
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    ensure_schema(&pool).await;

    pool
}

/// Mirror of migrations/, applied idempotently for a fresh test database
async fn ensure_schema(pool: &PgPool) {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id       VARCHAR(128) PRIMARY KEY,
            owner    VARCHAR(256) NOT NULL,
            balance  NUMERIC(16, 2) NOT NULL DEFAULT 0 CHECK (balance >= 0),
            currency VARCHAR(8) NOT NULL CHECK (currency IN ('USD', 'PHP', 'RUB'))
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("Failed to create accounts table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id              UUID PRIMARY KEY,
            account_id      VARCHAR(128) NOT NULL REFERENCES accounts(id),
            direction       VARCHAR(16) NOT NULL,
            from_account_id VARCHAR(128) REFERENCES accounts(id),
            to_account_id   VARCHAR(128) REFERENCES accounts(id),
            amount          NUMERIC(16, 2) NOT NULL CHECK (amount > 0),
            created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CHECK (
                (direction = 'outgoing' AND to_account_id IS NOT NULL AND from_account_id IS NULL)
                OR
                (direction = 'incoming' AND from_account_id IS NOT NULL AND to_account_id IS NULL)
            )
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("Failed to create entries table");
}

/// Generate a unique account id so parallel tests never collide
pub fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Seed one account row
pub async fn create_account(
    pool: &PgPool,
    id: &str,
    owner: &str,
    balance: Decimal,
    currency: &str,
) {
    sqlx::query(
        r#"
        INSERT INTO accounts (id, owner, balance, currency)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(id)
    .bind(owner)
    .bind(balance)
    .bind(currency)
    .execute(pool)
    .await
    .expect("Failed to seed account");
}

/// Read an account's committed balance straight from the table
pub async fn balance_of(pool: &PgPool, id: &str) -> Decimal {
    sqlx::query_scalar("SELECT balance FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("Failed to read balance")
}

/// Count entries recorded against an account
pub async fn entry_count(pool: &PgPool, account_id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM entries WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count entries")
}
