//! # Category Repository
//!
//! Database operations for menu categories.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use warung_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Creates a category and returns the stored row.
    pub async fn create(&self, name: &str) -> DbResult<Category> {
        let now = Utc::now();
        debug!(name = %name, "Creating category");

        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, created_at, updated_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Lists all categories, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_create_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let makanan = repo.create("Makanan").await.unwrap();
        let minuman = repo.create("Minuman").await.unwrap();
        assert!(minuman.id > makanan.id);

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Makanan");
        assert_eq!(all[1].name, "Minuman");
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        repo.create("Makanan").await.unwrap();
        let err = repo.create("Makanan").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
