//! # Pricing Module
//!
//! Line-item validation and transaction totals.
//!
//! ## The Anti-Tampering Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Client request:   { menu_id: 3, quantity: 2, price: 1 }        │
//! │                                      │           │              │
//! │                                      │           ▼              │
//! │                                      │       IGNORED            │
//! │                                      ▼                          │
//! │  Server:   look up menu 3 ──► PricedLine { unit_price: 18000 }  │
//! │                                                                 │
//! │  The caller controls WHAT and HOW MANY, never HOW MUCH.         │
//! │  Subtotal is recomputed server-side on every request.           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The one deliberate gap: a non-zero caller-supplied `total` is trusted
//! verbatim (see [`build_transaction`]). That asymmetry is inherited
//! behavior, kept until the pricing policy says otherwise.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::MenuItem;
use crate::validation::validate_quantity;

// =============================================================================
// Requested and Priced Lines
// =============================================================================

/// One requested line of a transaction, as the client sends it.
///
/// Only the menu id and quantity are read. Clients routinely send a
/// `price` field too; it is dropped at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct LineRequest {
    pub menu_id: i64,
    pub quantity: i64,
}

/// A validated line carrying the server-resolved unit price and a
/// snapshot of the menu name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub menu_id: i64,
    pub menu_name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl PricedLine {
    /// Prices a requested quantity against a resolved menu item.
    ///
    /// Fails with `InvalidQuantity` for non-positive quantities. The
    /// unit price always comes from `menu`, never from the request.
    pub fn from_menu(menu: &MenuItem, quantity: i64) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        Ok(PricedLine {
            menu_id: menu.id,
            menu_name: menu.name.clone(),
            quantity,
            unit_price: menu.price,
        })
    }

    /// Line total at the server price.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Transaction Aggregation
// =============================================================================

/// Caller-supplied transaction fields that survive validation.
///
/// `subtotal` is conspicuously absent: it is always recomputed from the
/// priced lines.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
    pub payment_method: String,
    pub amount_paid: Money,
}

/// A fully-aggregated transaction ready for atomic persistence.
///
/// Ids are assigned by the store; everything else is final.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
    pub payment_method: String,
    pub amount_paid: Money,
    pub cashier_id: Option<i64>,
    pub items: Vec<PricedLine>,
    pub created_at: DateTime<Utc>,
}

/// Aggregates validated lines and caller fields into a transaction.
///
/// ## Rules
/// - `subtotal` = Σ line totals, overriding whatever the caller sent.
/// - `tax` is a passthrough field; it defaults to 0 via the draft.
/// - `total` is recomputed as `subtotal + tax - discount` **only when**
///   the caller supplied exactly zero; a non-zero caller total is kept
///   verbatim. The tampering protection on subtotal is deliberately not
///   mirrored here - existing clients rely on sending their own total.
/// - An empty `payment_method` falls back to `fallback_payment`.
/// - `cashier_id` comes from the authenticated session, when there is one.
pub fn build_transaction(
    items: Vec<PricedLine>,
    draft: TransactionDraft,
    cashier_id: Option<i64>,
    fallback_payment: &str,
    created_at: DateTime<Utc>,
) -> NewTransaction {
    let subtotal: Money = items.iter().map(PricedLine::line_total).sum();

    let total = if draft.total.is_zero() {
        subtotal + draft.tax - draft.discount
    } else {
        draft.total
    };

    let payment_method = if draft.payment_method.trim().is_empty() {
        fallback_payment.to_string()
    } else {
        draft.payment_method
    };

    NewTransaction {
        subtotal,
        tax: draft.tax,
        discount: draft.discount,
        total,
        payment_method,
        amount_paid: draft.amount_paid,
        cashier_id,
        items,
        created_at,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::DEFAULT_PAYMENT_METHOD;

    fn menu(id: i64, name: &str, price: i64) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            description: String::new(),
            price: Money::from_rupiah(price),
            category_id: None,
            image_url: String::new(),
            is_available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_priced_line_uses_server_price() {
        let m = menu(1, "Nasi Goreng", 10_000);
        let line = PricedLine::from_menu(&m, 2).unwrap();
        assert_eq!(line.unit_price, Money::from_rupiah(10_000));
        assert_eq!(line.line_total(), Money::from_rupiah(20_000));
        assert_eq!(line.menu_name, "Nasi Goreng");
    }

    #[test]
    fn test_priced_line_rejects_bad_quantity() {
        let m = menu(1, "Nasi Goreng", 10_000);
        assert!(matches!(
            PricedLine::from_menu(&m, 0),
            Err(CoreError::InvalidQuantity { quantity: 0 })
        ));
        assert!(matches!(
            PricedLine::from_menu(&m, -1),
            Err(CoreError::InvalidQuantity { quantity: -1 })
        ));
    }

    /// Scenario from the pricing contract: A priced 10_000, B priced
    /// 5_000, request [{A,2},{B,1}] with client price fields ignored.
    #[test]
    fn test_subtotal_recomputed_from_server_prices() {
        let a = menu(1, "A", 10_000);
        let b = menu(2, "B", 5_000);
        let items = vec![
            PricedLine::from_menu(&a, 2).unwrap(),
            PricedLine::from_menu(&b, 1).unwrap(),
        ];

        let tx = build_transaction(
            items,
            TransactionDraft::default(),
            None,
            DEFAULT_PAYMENT_METHOD,
            Utc::now(),
        );

        assert_eq!(tx.subtotal, Money::from_rupiah(25_000));
        assert_eq!(tx.total, Money::from_rupiah(25_000));
        assert_eq!(tx.tax, Money::zero());
        assert_eq!(tx.discount, Money::zero());
    }

    #[test]
    fn test_total_recomputed_when_caller_sends_zero() {
        let m = menu(1, "A", 10_000);
        let items = vec![PricedLine::from_menu(&m, 1).unwrap()];
        let draft = TransactionDraft {
            tax: Money::from_rupiah(1_000),
            discount: Money::from_rupiah(500),
            total: Money::zero(),
            ..Default::default()
        };

        let tx = build_transaction(items, draft, None, DEFAULT_PAYMENT_METHOD, Utc::now());
        assert_eq!(tx.total, Money::from_rupiah(10_500));
    }

    /// Documents the non-uniform trust policy: a non-zero caller total
    /// is kept verbatim, even when it disagrees with the recomputed sum.
    #[test]
    fn test_nonzero_caller_total_trusted_verbatim() {
        let m = menu(1, "A", 10_000);
        let items = vec![PricedLine::from_menu(&m, 2).unwrap()];
        let draft = TransactionDraft {
            total: Money::from_rupiah(1),
            ..Default::default()
        };

        let tx = build_transaction(items, draft, None, DEFAULT_PAYMENT_METHOD, Utc::now());
        assert_eq!(tx.subtotal, Money::from_rupiah(20_000));
        assert_eq!(tx.total, Money::from_rupiah(1));
    }

    #[test]
    fn test_payment_method_fallback() {
        let m = menu(1, "A", 10_000);
        let items = vec![PricedLine::from_menu(&m, 1).unwrap()];

        let tx = build_transaction(
            items.clone(),
            TransactionDraft::default(),
            None,
            "tunai",
            Utc::now(),
        );
        assert_eq!(tx.payment_method, "tunai");

        let draft = TransactionDraft {
            payment_method: "qris".to_string(),
            ..Default::default()
        };
        let tx = build_transaction(items, draft, None, "tunai", Utc::now());
        assert_eq!(tx.payment_method, "qris");
    }

    #[test]
    fn test_cashier_attached_from_session() {
        let m = menu(1, "A", 10_000);
        let items = vec![PricedLine::from_menu(&m, 1).unwrap()];
        let tx = build_transaction(
            items,
            TransactionDraft::default(),
            Some(7),
            DEFAULT_PAYMENT_METHOD,
            Utc::now(),
        );
        assert_eq!(tx.cashier_id, Some(7));
    }

    #[test]
    fn test_line_request_ignores_client_price_field() {
        let req: LineRequest =
            serde_json::from_str(r#"{"menu_id": 3, "quantity": 2, "price": 1}"#).unwrap();
        assert_eq!(req.menu_id, 3);
        assert_eq!(req.quantity, 2);
    }
}
