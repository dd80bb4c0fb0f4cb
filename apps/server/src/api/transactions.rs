//! Transaction creation and lookup.
//!
//! The create path is the heart of the system:
//!
//! ```text
//! request items ──► price_items           per-item, short-circuit:
//!                     validate quantity   ── InvalidQuantity? stop
//!                     resolve menu        ── MenuNotFound?    stop
//!                     copy server price
//!       │
//!       ▼
//! build_transaction   subtotal recomputed, total rule, defaults
//!       │
//!       ▼
//! repository create   transaction + items in ONE sql transaction
//!       │
//!       ▼
//! notifier            {"type":"transaction_created",...} to SSE clients
//! ```
//!
//! There is no cross-request coordination here: two concurrent sales
//! never serialize on anything but the database itself, and a menu price
//! edit racing a sale is accepted behavior.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use warung_core::pricing::{build_transaction, LineRequest, PricedLine, TransactionDraft};
use warung_core::validation::validate_quantity;
use warung_core::{CoreError, Money};
use warung_db::Database;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::success;

/// Client payload for creating a transaction.
///
/// `subtotal` is accepted for wire compatibility and then ignored: the
/// server recomputes it from authoritative menu prices. Per-item price
/// fields are likewise dropped during deserialization.
#[derive(Debug, Deserialize)]
pub struct TransactionCreateRequest {
    pub items: Vec<LineRequest>,
    #[serde(default)]
    #[allow(dead_code)]
    pub subtotal: Money,
    #[serde(default)]
    pub tax: Money,
    #[serde(default)]
    pub discount: Money,
    #[serde(default)]
    pub total: Money,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub amount_paid: Money,
}

/// Fan-out payload for a completed sale.
#[derive(Debug, Serialize)]
struct TransactionCreatedEvent {
    #[serde(rename = "type")]
    kind: &'static str,
    id: i64,
    total: Money,
    cashier_id: Option<i64>,
}

/// Validates and prices request lines against the menu, one lookup per
/// item, stopping at the first failure.
async fn price_items(db: &Database, items: &[LineRequest]) -> Result<Vec<PricedLine>, ApiError> {
    let menus = db.menus();
    let mut lines = Vec::with_capacity(items.len());

    for req in items {
        validate_quantity(req.quantity)?;

        let menu = menus
            .find_by_id(req.menu_id)
            .await?
            .ok_or(CoreError::MenuNotFound { id: req.menu_id })?;

        lines.push(PricedLine::from_menu(&menu, req.quantity)?);
    }

    Ok(lines)
}

/// POST /api/transactions
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<TransactionCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.items.is_empty() {
        return Err(ApiError::bad_request("items are required"));
    }

    let lines = price_items(&state.db, &req.items).await?;

    let draft = TransactionDraft {
        tax: req.tax,
        discount: req.discount,
        total: req.total,
        payment_method: req.payment_method,
        amount_paid: req.amount_paid,
    };

    let new = build_transaction(
        lines,
        draft,
        Some(user.id),
        &state.config.default_payment_method,
        Utc::now(),
    );

    let transaction = state.db.transactions().create(&new).await?;

    info!(
        id = %transaction.id,
        total = %transaction.total,
        items = transaction.items.len(),
        cashier = %user.id,
        "Transaction created"
    );

    // Best-effort ping to live listeners; failures only drop messages.
    let event = TransactionCreatedEvent {
        kind: "transaction_created",
        id: transaction.id,
        total: transaction.total,
        cashier_id: transaction.cashier_id,
    };
    if let Ok(payload) = serde_json::to_string(&event) {
        state.notifier.notify(payload);
    }

    Ok((StatusCode::CREATED, success(transaction)))
}

/// GET /api/transactions
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let transactions = state.db.transactions().list().await?;
    Ok(success(transactions))
}

/// GET /api/transactions/{id}
pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .db
        .transactions()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("transaction not found"))?;

    Ok(success(transaction))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use warung_core::NewMenu;
    use warung_db::DbConfig;

    async fn db_with_menu(price: i64) -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let menu = db
            .menus()
            .create(&NewMenu {
                name: "Nasi Goreng".to_string(),
                description: String::new(),
                price: Money::from_rupiah(price),
                category_id: None,
                image_url: String::new(),
                is_available: true,
            })
            .await
            .unwrap();
        (db, menu.id)
    }

    fn line(menu_id: i64, quantity: i64) -> LineRequest {
        LineRequest { menu_id, quantity }
    }

    #[tokio::test]
    async fn test_price_items_resolves_server_prices() {
        let (db, menu_id) = db_with_menu(18_000).await;

        let lines = price_items(&db, &[line(menu_id, 2)]).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].unit_price, Money::from_rupiah(18_000));
        assert_eq!(lines[0].menu_name, "Nasi Goreng");
    }

    #[tokio::test]
    async fn test_price_items_rejects_unknown_menu() {
        let (db, _menu_id) = db_with_menu(18_000).await;

        let err = price_items(&db, &[line(999, 1)]).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(err.to_string().contains("menu id 999 not found"));
    }

    /// Validation short-circuits: the bad quantity on the first item
    /// wins, even though the second item references an unknown menu.
    #[tokio::test]
    async fn test_price_items_short_circuits_on_first_failure() {
        let (db, menu_id) = db_with_menu(18_000).await;

        let err = price_items(&db, &[line(menu_id, 0), line(999, 1)])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("quantity must be positive"));
    }

    #[tokio::test]
    async fn test_request_ignores_client_prices() {
        let req: TransactionCreateRequest = serde_json::from_str(
            r#"{
                "items": [{"menu_id": 1, "quantity": 2, "price": 1}],
                "subtotal": 2,
                "total": 0
            }"#,
        )
        .unwrap();

        assert_eq!(req.items.len(), 1);
        assert_eq!(req.total, Money::zero());
        // Client subtotal is parsed but never used by the create path
        assert_eq!(req.tax, Money::zero());
    }
}
