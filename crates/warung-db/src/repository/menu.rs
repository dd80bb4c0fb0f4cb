//! # Menu Repository
//!
//! Database operations for menu items.
//!
//! The menu price column is the single source of truth for transaction
//! pricing: the transaction flow reads it through [`find_by_id`] and
//! copies it onto each line item (snapshot pattern).
//!
//! [`find_by_id`]: MenuRepository::find_by_id

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use warung_core::{MenuItem, NewMenu};

/// Repository for menu item database operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Inserts a menu item and returns the stored row.
    pub async fn create(&self, menu: &NewMenu) -> DbResult<MenuItem> {
        let now = Utc::now();
        debug!(name = %menu.name, price = %menu.price, "Creating menu item");

        let result = sqlx::query(
            r#"
            INSERT INTO menus (name, description, price, category_id, image_url, is_available, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&menu.name)
        .bind(&menu.description)
        .bind(menu.price)
        .bind(menu.category_id)
        .bind(&menu.image_url)
        .bind(menu.is_available)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(MenuItem {
            id: result.last_insert_rowid(),
            name: menu.name.clone(),
            description: menu.description.clone(),
            price: menu.price,
            category_id: menu.category_id,
            image_url: menu.image_url.clone(),
            is_available: menu.is_available,
            created_at: now,
            updated_at: now,
        })
    }

    /// Lists all menu items, oldest first.
    pub async fn list(&self) -> DbResult<Vec<MenuItem>> {
        let menus = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, description, price, category_id, image_url,
                   is_available, created_at, updated_at
            FROM menus
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(menus)
    }

    /// Gets a menu item by id.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<MenuItem>> {
        let menu = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, description, price, category_id, image_url,
                   is_available, created_at, updated_at
            FROM menus
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(menu)
    }

    /// Saves a full menu row (used after applying a patch).
    ///
    /// `updated_at` is stamped here, not by the caller.
    pub async fn update(&self, menu: &MenuItem) -> DbResult<MenuItem> {
        let now = Utc::now();
        debug!(id = %menu.id, "Updating menu item");

        let result = sqlx::query(
            r#"
            UPDATE menus SET
                name = ?2,
                description = ?3,
                price = ?4,
                category_id = ?5,
                image_url = ?6,
                is_available = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(menu.id)
        .bind(&menu.name)
        .bind(&menu.description)
        .bind(menu.price)
        .bind(menu.category_id)
        .bind(&menu.image_url)
        .bind(menu.is_available)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("menu", menu.id));
        }

        let mut updated = menu.clone();
        updated.updated_at = now;
        Ok(updated)
    }

    /// Deletes a menu item.
    ///
    /// Past transaction items keep their price snapshot; their `menu_id`
    /// goes NULL via the foreign key's ON DELETE SET NULL.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM menus WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("menu", id));
        }

        debug!(id = %id, "Deleted menu item");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use warung_core::{MenuPatch, Money};

    fn new_menu(name: &str, price: i64) -> NewMenu {
        NewMenu {
            name: name.to_string(),
            description: String::new(),
            price: Money::from_rupiah(price),
            category_id: None,
            image_url: String::new(),
            is_available: true,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.menus();

        let created = repo.create(&new_menu("Nasi Goreng", 18_000)).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Nasi Goreng");
        assert_eq!(found.price, Money::from_rupiah(18_000));
        assert!(found.is_available);

        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_patch_then_update() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.menus();

        let mut menu = repo.create(&new_menu("Es Teh", 5_000)).await.unwrap();

        let patch = MenuPatch {
            price: Some(Money::from_rupiah(6_000)),
            is_available: Some(false),
            ..Default::default()
        };
        patch.apply(&mut menu).unwrap();
        repo.update(&menu).await.unwrap();

        let found = repo.find_by_id(menu.id).await.unwrap().unwrap();
        assert_eq!(found.price, Money::from_rupiah(6_000));
        assert!(!found.is_available);
        assert_eq!(found.name, "Es Teh");
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.menus();

        let mut ghost = repo.create(&new_menu("Ghost", 1_000)).await.unwrap();
        repo.delete(ghost.id).await.unwrap();

        ghost.name = "Still Ghost".to_string();
        assert!(matches!(
            repo.update(&ghost).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(ghost.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.menus();

        repo.create(&new_menu("A", 1_000)).await.unwrap();
        repo.create(&new_menu("B", 2_000)).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "A");
        assert_eq!(all[1].name, "B");
    }
}
