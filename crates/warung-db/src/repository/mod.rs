//! # Repository Module
//!
//! Database repository implementations for Warung POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                   │
//! │      │                                                          │
//! │      │  db.menus().find_by_id(3)                                │
//! │      ▼                                                          │
//! │  MenuRepository ── SQL ──► SQLite                               │
//! │                                                                 │
//! │  Each repository owns the SQL for one aggregate. Handlers       │
//! │  never see a connection pool or a query string.                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod category;
pub mod menu;
pub mod transaction;
pub mod user;
