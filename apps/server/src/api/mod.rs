//! HTTP route handlers.
//!
//! One module per resource, mirroring the route tree in
//! [`crate::routes`]. Request/response DTOs live beside the handlers
//! that use them.
//!
//! All JSON responses use a common envelope:
//! `{"status":"success","data":...}` on the happy path,
//! `{"status":"error","message":...}` via [`crate::error::ApiError`].

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

pub mod auth;
pub mod categories;
pub mod menus;
pub mod notifications;
pub mod reports;
pub mod transactions;
pub mod uploads;

/// Wraps payload data in the success envelope.
pub(crate) fn success<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "status": "success", "data": data }))
}

/// Success envelope with a message instead of data.
pub(crate) fn message(text: &str) -> Json<Value> {
    Json(json!({ "status": "success", "message": text }))
}
