//! # Domain Types
//!
//! Core domain types used throughout Warung POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                             │
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │   MenuItem   │  │ Transaction  │  │     User     │           │
//! │  │ ──────────── │  │ ──────────── │  │ ──────────── │           │
//! │  │ id           │  │ id           │  │ id           │           │
//! │  │ name         │  │ items[]      │  │ email        │           │
//! │  │ price        │  │ subtotal     │  │ role         │           │
//! │  │ category_id  │  │ total        │  │ password_hash│           │
//! │  │ is_available │  │ cashier_id   │  └──────────────┘           │
//! │  └──────────────┘  └──────────────┘                             │
//! │                                                                 │
//! │  LineItem: one priced, quantity-bearing row of a Transaction.   │
//! │  The unit price is copied from the menu at transaction time     │
//! │  (snapshot pattern) so history survives later price edits.      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_menu_description, validate_menu_name, validate_price};

// =============================================================================
// Category
// =============================================================================

/// A menu category (e.g. "Makanan", "Minuman").
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    /// Unique display name.
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish or drink offered for sale.
///
/// The `price` field is the single source of truth for transaction
/// pricing: the transaction core reads it, never writes it.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Unit price in whole rupiah.
    pub price: Money,
    pub category_id: Option<i64>,
    /// Public URL of the uploaded product photo, empty if none.
    pub image_url: String,
    /// Whether the item is currently orderable (sold-out toggle).
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a menu item.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMenu {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

impl NewMenu {
    /// Validates the payload field-by-field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_menu_name(&self.name)?;
        validate_menu_description(&self.description)?;
        validate_price(self.price)?;
        Ok(())
    }
}

/// Partial update for a menu item.
///
/// Every field is optional: an absent field leaves the current value
/// untouched, a present field is validated and applied. This replaces
/// merging an untyped key/value map into the record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

impl MenuPatch {
    /// Applies the present fields to `menu`, validating each one.
    ///
    /// On error nothing is guaranteed about `menu`'s state; callers apply
    /// the patch to a copy and persist only on success.
    pub fn apply(self, menu: &mut MenuItem) -> Result<(), ValidationError> {
        if let Some(name) = self.name {
            validate_menu_name(&name)?;
            menu.name = name;
        }
        if let Some(description) = self.description {
            validate_menu_description(&description)?;
            menu.description = description;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
            menu.price = price;
        }
        if let Some(category_id) = self.category_id {
            menu.category_id = Some(category_id);
        }
        if let Some(image_url) = self.image_url {
            menu.image_url = image_url;
        }
        if let Some(is_available) = self.is_available {
            menu.is_available = is_available;
        }
        Ok(())
    }

    /// True if no field is present (nothing to do).
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
            && self.image_url.is_none()
            && self.is_available.is_none()
    }
}

fn default_true() -> bool {
    true
}

// =============================================================================
// User
// =============================================================================

/// Account role, checked by the admin-only routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// A user account (cashier or admin).
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// argon2 hash. Never serialized in responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a user account (password already hashed).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

// =============================================================================
// Transaction
// =============================================================================

/// One priced line of a transaction.
///
/// `unit_price` is the menu price frozen at transaction time, and
/// `menu_name` is joined in at read time so reports can label best
/// sellers even after the menu row changes. `menu_id` is `None` when the
/// referenced menu item has been deleted since.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LineItem {
    pub id: i64,
    pub transaction_id: i64,
    pub menu_id: Option<i64>,
    pub menu_name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl LineItem {
    /// Line total (unit price × quantity) at the stored price.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// A completed sale.
///
/// Created once, atomically with all its line items, and never mutated
/// afterwards - there is no update or delete operation for transactions.
///
/// Invariant: `subtotal == Σ quantity × unit_price` over `items`.
/// `total == subtotal + tax - discount` unless the caller deliberately
/// supplied a non-zero total (see [`crate::pricing::build_transaction`]).
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: i64,
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
    pub payment_method: String,
    pub amount_paid: Money,
    /// The authenticated cashier who rang the sale up, if any.
    pub cashier_id: Option<i64>,
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub items: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_menu() -> MenuItem {
        MenuItem {
            id: 1,
            name: "Nasi Goreng".to_string(),
            description: String::new(),
            price: Money::from_rupiah(18_000),
            category_id: Some(1),
            image_url: String::new(),
            is_available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_default() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_patch_applies_present_fields_only() {
        let mut menu = sample_menu();
        let patch = MenuPatch {
            price: Some(Money::from_rupiah(20_000)),
            is_available: Some(false),
            ..Default::default()
        };

        patch.apply(&mut menu).unwrap();

        assert_eq!(menu.price, Money::from_rupiah(20_000));
        assert!(!menu.is_available);
        // Absent fields untouched
        assert_eq!(menu.name, "Nasi Goreng");
        assert_eq!(menu.category_id, Some(1));
    }

    #[test]
    fn test_patch_validates_fields() {
        let mut menu = sample_menu();

        let patch = MenuPatch {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(patch.apply(&mut menu).is_err());

        let patch = MenuPatch {
            price: Some(Money::from_rupiah(-1)),
            ..Default::default()
        };
        assert!(patch.apply(&mut menu).is_err());
    }

    #[test]
    fn test_patch_absent_vs_empty() {
        let patch: MenuPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());

        let patch: MenuPatch = serde_json::from_str(r#"{"is_available": false}"#).unwrap();
        assert!(!patch.is_empty());
        assert_eq!(patch.is_available, Some(false));
    }

    #[test]
    fn test_new_menu_defaults() {
        let menu: NewMenu =
            serde_json::from_str(r#"{"name": "Es Teh", "price": 5000}"#).unwrap();
        assert!(menu.is_available);
        assert!(menu.description.is_empty());
        assert!(menu.category_id.is_none());
        menu.validate().unwrap();
    }

    #[test]
    fn test_user_hides_password_hash() {
        let user = User {
            id: 1,
            name: "Admin".to_string(),
            email: "admin@warung.local".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"role\":\"admin\""));
    }

    #[test]
    fn test_line_total_uses_stored_price() {
        let item = LineItem {
            id: 1,
            transaction_id: 1,
            menu_id: Some(7),
            menu_name: "Ayam Bakar".to_string(),
            quantity: 3,
            unit_price: Money::from_rupiah(22_000),
        };
        assert_eq!(item.line_total(), Money::from_rupiah(66_000));
    }
}
