//! API Routes
//!
//! HTTP endpoint definitions. Thin adapters over the transfer handler and
//! the ledger store's read side; no invariants are enforced here.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Account, Currency, Entry};
use crate::error::AppError;
use crate::handlers::{TransferCommand, TransferHandler};
use crate::store::LedgerStore;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub owner: String,
    pub balance: Decimal,
    pub currency: Currency,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            balance: account.balance().value(),
            currency: account.currency(),
            id: account.id().to_string(),
            owner: account.owner().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub account: String,
    pub direction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account: Option<String>,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Entry> for PaymentResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id(),
            account: entry.account_id().to_string(),
            direction: entry.direction().as_str().to_string(),
            from_account: entry.direction().from_account().map(str::to_string),
            to_account: entry.direction().to_account().map(str::to_string),
            amount: entry.amount().value(),
            created_at: entry.created_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub from_account: String,
    pub to_account: String,
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    pub outgoing: PaymentResponse,
    pub incoming: PaymentResponse,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<PgPool> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/payments", get(list_payments).post(create_payment))
}

// =========================================================================
// GET /accounts
// =========================================================================

/// List all accounts.
/// The application is small enough that returning every account is fine.
async fn list_accounts(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let store = LedgerStore::new(pool);

    let accounts = store.list_accounts().await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

// =========================================================================
// GET /payments
// =========================================================================

/// List all payment entries, oldest first
async fn list_payments(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    let store = LedgerStore::new(pool);

    let entries = store.list_entries().await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

// =========================================================================
// POST /payments
// =========================================================================

/// Send money from one account to another.
///
/// Malformed bodies never reach the handler: the JSON extractor rejects
/// them before this function runs.
async fn create_payment(
    State(pool): State<PgPool>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<CreatePaymentResponse>), AppError> {
    let handler = TransferHandler::new(pool);

    let command = TransferCommand::new(request.from_account, request.to_account, request.amount);

    let result = handler.execute(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePaymentResponse {
            outgoing: result.outgoing.into(),
            incoming: result.incoming.into(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, Balance};
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_payment_request_deserialize() {
        let json = r#"{
            "from_account": "alice",
            "to_account": "bob",
            "amount": "10.00"
        }"#;

        let request: CreatePaymentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.from_account, "alice");
        assert_eq!(request.to_account, "bob");
        assert_eq!(request.amount, "10.00");
    }

    #[test]
    fn test_create_payment_request_missing_field() {
        let json = r#"{"from_account": "alice", "amount": "10.00"}"#;

        let request: Result<CreatePaymentRequest, _> = serde_json::from_str(json);
        assert!(request.is_err());
    }

    #[test]
    fn test_payment_response_omits_absent_counterparty() {
        let alice = Account::new(
            "alice",
            "Alice",
            Balance::new(dec!(100.00)).unwrap(),
            Currency::Php,
        );
        let bob = Account::new(
            "bob",
            "Bob",
            Balance::new(dec!(100.00)).unwrap(),
            Currency::Php,
        );
        let entry = Entry::outgoing(&alice, &bob, Amount::new(dec!(10.00)).unwrap()).unwrap();

        let response: PaymentResponse = entry.into();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["direction"], "outgoing");
        assert_eq!(json["to_account"], "bob");
        assert!(json.get("from_account").is_none());
    }
}
