//! # Transaction Repository
//!
//! Database operations for sales transactions.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  create(NewTransaction)                                         │
//! │                                                                 │
//! │  BEGIN                                                          │
//! │    INSERT INTO transactions ...        ← totals, cashier        │
//! │    INSERT INTO transaction_items ...   ← one per priced line    │
//! │    INSERT INTO transaction_items ...                            │
//! │  COMMIT                                                         │
//! │                                                                 │
//! │  Either the whole sale lands or none of it does. Readers never  │
//! │  see a transaction without its line items.                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transactions are append-only: there is no update or delete here.

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use warung_core::pricing::NewTransaction;
use warung_core::{LineItem, Transaction};

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Persists a fully-aggregated transaction with all its line items,
    /// atomically, and returns the stored form.
    pub async fn create(&self, new: &NewTransaction) -> DbResult<Transaction> {
        let mut db_tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO transactions
                (subtotal, tax, discount, total, payment_method, amount_paid, cashier_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(new.subtotal)
        .bind(new.tax)
        .bind(new.discount)
        .bind(new.total)
        .bind(&new.payment_method)
        .bind(new.amount_paid)
        .bind(new.cashier_id)
        .bind(new.created_at)
        .execute(&mut *db_tx)
        .await?;

        let id = result.last_insert_rowid();

        let mut items = Vec::with_capacity(new.items.len());
        for line in &new.items {
            let result = sqlx::query(
                r#"
                INSERT INTO transaction_items (transaction_id, menu_id, quantity, unit_price)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(id)
            .bind(line.menu_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut *db_tx)
            .await?;

            items.push(LineItem {
                id: result.last_insert_rowid(),
                transaction_id: id,
                menu_id: Some(line.menu_id),
                menu_name: line.menu_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            });
        }

        db_tx.commit().await?;

        debug!(id = %id, total = %new.total, items = items.len(), "Transaction persisted");

        Ok(Transaction {
            id,
            subtotal: new.subtotal,
            tax: new.tax,
            discount: new.discount,
            total: new.total,
            payment_method: new.payment_method.clone(),
            amount_paid: new.amount_paid,
            cashier_id: new.cashier_id,
            items,
            created_at: new.created_at,
        })
    }

    /// Lists all transactions, oldest first, each with its line items.
    ///
    /// Menu names are joined onto the line items so report consumers can
    /// label best sellers; a deleted menu yields an empty name.
    pub async fn list(&self) -> DbResult<Vec<Transaction>> {
        let mut transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, subtotal, tax, discount, total, payment_method,
                   amount_paid, cashier_id, created_at
            FROM transactions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let items = self.fetch_items(None).await?;
        let mut by_tx: HashMap<i64, Vec<LineItem>> = HashMap::new();
        for item in items {
            by_tx.entry(item.transaction_id).or_default().push(item);
        }

        for tx in &mut transactions {
            tx.items = by_tx.remove(&tx.id).unwrap_or_default();
        }

        Ok(transactions)
    }

    /// Gets one transaction by id, with its line items.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, subtotal, tax, discount, total, payment_method,
                   amount_paid, cashier_id, created_at
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut transaction) = transaction else {
            return Ok(None);
        };

        transaction.items = self.fetch_items(Some(id)).await?;
        Ok(Some(transaction))
    }

    /// Fetches line items (for one transaction, or all of them) with the
    /// menu name joined in.
    async fn fetch_items(&self, transaction_id: Option<i64>) -> DbResult<Vec<LineItem>> {
        let items = match transaction_id {
            Some(id) => {
                sqlx::query_as::<_, LineItem>(
                    r#"
                    SELECT ti.id, ti.transaction_id, ti.menu_id,
                           COALESCE(m.name, '') AS menu_name,
                           ti.quantity, ti.unit_price
                    FROM transaction_items ti
                    LEFT JOIN menus m ON m.id = ti.menu_id
                    WHERE ti.transaction_id = ?1
                    ORDER BY ti.id
                    "#,
                )
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, LineItem>(
                    r#"
                    SELECT ti.id, ti.transaction_id, ti.menu_id,
                           COALESCE(m.name, '') AS menu_name,
                           ti.quantity, ti.unit_price
                    FROM transaction_items ti
                    LEFT JOIN menus m ON m.id = ti.menu_id
                    ORDER BY ti.transaction_id, ti.id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use warung_core::pricing::{build_transaction, PricedLine, TransactionDraft};
    use warung_core::{Money, NewMenu, NewUser, Role, DEFAULT_PAYMENT_METHOD};

    async fn seed_menu(db: &Database, name: &str, price: i64) -> warung_core::MenuItem {
        db.menus()
            .create(&NewMenu {
                name: name.to_string(),
                description: String::new(),
                price: Money::from_rupiah(price),
                category_id: None,
                image_url: String::new(),
                is_available: true,
            })
            .await
            .unwrap()
    }

    fn priced(menu: &warung_core::MenuItem, qty: i64) -> PricedLine {
        PricedLine::from_menu(menu, qty).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_read_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let nasi = seed_menu(&db, "Nasi Goreng", 18_000).await;
        let teh = seed_menu(&db, "Es Teh", 5_000).await;

        let cashier = db
            .users()
            .create(&NewUser {
                name: "Kasir".to_string(),
                email: "kasir@warung.local".to_string(),
                password_hash: "$argon2id$fake".to_string(),
                role: Role::User,
            })
            .await
            .unwrap();

        let new = build_transaction(
            vec![priced(&nasi, 2), priced(&teh, 1)],
            TransactionDraft::default(),
            Some(cashier.id),
            DEFAULT_PAYMENT_METHOD,
            Utc::now(),
        );

        let stored = db.transactions().create(&new).await.unwrap();
        assert_eq!(stored.subtotal, Money::from_rupiah(41_000));
        assert_eq!(stored.total, Money::from_rupiah(41_000));
        assert_eq!(stored.items.len(), 2);

        let fetched = db
            .transactions()
            .find_by_id(stored.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.total, Money::from_rupiah(41_000));
        assert_eq!(fetched.cashier_id, Some(cashier.id));
        assert_eq!(fetched.payment_method, DEFAULT_PAYMENT_METHOD);
        assert_eq!(fetched.items.len(), 2);
        assert_eq!(fetched.items[0].menu_name, "Nasi Goreng");
        assert_eq!(fetched.items[0].quantity, 2);
        assert_eq!(fetched.items[1].menu_name, "Es Teh");

        assert!(db.transactions().find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_groups_items_per_transaction() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let nasi = seed_menu(&db, "Nasi Goreng", 18_000).await;

        for qty in [1, 3] {
            let new = build_transaction(
                vec![priced(&nasi, qty)],
                TransactionDraft::default(),
                None,
                DEFAULT_PAYMENT_METHOD,
                Utc::now(),
            );
            db.transactions().create(&new).await.unwrap();
        }

        let all = db.transactions().list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].items.len(), 1);
        assert_eq!(all[0].items[0].quantity, 1);
        assert_eq!(all[1].items[0].quantity, 3);
    }

    /// The stored unit price must survive later menu edits and even menu
    /// deletion; only the joined name degrades (to empty, grouped under
    /// menu id 0 by the report engine).
    #[tokio::test]
    async fn test_price_snapshot_survives_menu_changes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut nasi = seed_menu(&db, "Nasi Goreng", 18_000).await;

        let new = build_transaction(
            vec![priced(&nasi, 1)],
            TransactionDraft::default(),
            None,
            DEFAULT_PAYMENT_METHOD,
            Utc::now(),
        );
        let stored = db.transactions().create(&new).await.unwrap();

        // Raise the price afterwards
        nasi.price = Money::from_rupiah(25_000);
        db.menus().update(&nasi).await.unwrap();

        let fetched = db
            .transactions()
            .find_by_id(stored.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.items[0].unit_price, Money::from_rupiah(18_000));

        // Delete the menu entirely
        db.menus().delete(nasi.id).await.unwrap();

        let fetched = db
            .transactions()
            .find_by_id(stored.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.items[0].menu_id, None);
        assert_eq!(fetched.items[0].menu_name, "");
        assert_eq!(fetched.items[0].unit_price, Money::from_rupiah(18_000));
    }

    /// A failing line-item insert must roll the whole sale back.
    #[tokio::test]
    async fn test_create_is_atomic() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // Hand-craft a line referencing a menu id that does not exist,
        // violating the foreign key on the second insert.
        let new = warung_core::pricing::NewTransaction {
            subtotal: Money::from_rupiah(10_000),
            tax: Money::zero(),
            discount: Money::zero(),
            total: Money::from_rupiah(10_000),
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
            amount_paid: Money::from_rupiah(10_000),
            cashier_id: None,
            items: vec![PricedLine {
                menu_id: 9_999,
                menu_name: "Ghost".to_string(),
                quantity: 1,
                unit_price: Money::from_rupiah(10_000),
            }],
            created_at: Utc::now(),
        };

        assert!(db.transactions().create(&new).await.is_err());
        assert!(db.transactions().list().await.unwrap().is_empty());
    }
}
