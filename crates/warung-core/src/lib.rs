//! # warung-core: Pure Business Logic for Warung POS
//!
//! This crate is the heart of the Warung POS backend. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Warung POS Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  HTTP Handlers (apps/server)                │   │
//! │  │    auth, menus, transactions, reports, notifications        │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              ★ warung-core (THIS CRATE) ★                   │   │
//! │  │                                                             │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────────────┐   │   │
//! │  │  │  types  │ │  money  │ │ pricing  │ │     report     │   │   │
//! │  │  │ Menu    │ │  Money  │ │ Validate │ │ DailyReport    │   │   │
//! │  │  │ Txn     │ │ rupiah  │ │ + totals │ │ BestSeller     │   │   │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └────────────────┘   │   │
//! │  │                                                             │   │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS         │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │                 warung-db (Database Layer)                  │   │
//! │  │           SQLite queries, migrations, repositories          │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Transaction, User, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`pricing`] - Line-item pricing and transaction totals
//! - [`report`] - Daily and multi-day sales aggregation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same input, same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are whole rupiah (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

pub mod error;
pub mod money;
pub mod pricing;
pub mod report;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Payment-method label used when the client leaves the field empty.
///
/// "tunai" is Indonesian for cash, which is how the vast majority of
/// warung sales are settled. The server config can override it.
pub const DEFAULT_PAYMENT_METHOD: &str = "tunai";

/// Window size (in days) for the multi-day revenue aggregate when the
/// caller omits or botches the `days` parameter.
pub const DEFAULT_REPORT_DAYS: i64 = 7;
