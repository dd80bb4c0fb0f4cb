//! # User Repository
//!
//! Database operations for user accounts.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use warung_core::{NewUser, User};

/// Repository for user account database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a user and returns the stored row.
    ///
    /// The password must already be hashed; this layer never sees
    /// plaintext credentials.
    pub async fn create(&self, user: &NewUser) -> DbResult<User> {
        let now = Utc::now();
        debug!(email = %user.email, "Creating user");

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            created_at: now,
        })
    }

    /// Finds a user by email (login path).
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by id (token validation path).
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use warung_core::Role;

    fn kasir() -> NewUser {
        NewUser {
            name: "Kasir".to_string(),
            email: "kasir@warung.local".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        let created = repo.create(&kasir()).await.unwrap();
        assert_eq!(created.role, Role::User);

        let by_email = repo
            .find_by_email("kasir@warung.local")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "kasir@warung.local");

        assert!(repo.find_by_email("nobody@warung.local").await.unwrap().is_none());
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        repo.create(&kasir()).await.unwrap();
        let err = repo.create(&kasir()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_admin_role_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        let admin = NewUser {
            role: Role::Admin,
            email: "admin@warung.local".to_string(),
            ..kasir()
        };
        let created = repo.create(&admin).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.role, Role::Admin);
    }
}
