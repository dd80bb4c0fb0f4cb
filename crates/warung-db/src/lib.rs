//! # warung-db: Database Layer for Warung POS
//!
//! SQLite storage for the Warung POS backend, using sqlx for async
//! operations.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (menu, transaction, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warung_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("warung.db")).await?;
//! let menus = db.menus().list().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::category::CategoryRepository;
pub use repository::menu::MenuRepository;
pub use repository::transaction::TransactionRepository;
pub use repository::user::UserRepository;
