//! Menu item CRUD.
//!
//! Writes are admin-only except the availability toggle, which any
//! authenticated cashier may flip when something sells out. Updates take
//! a [`MenuPatch`]: absent fields stay untouched, present fields are
//! validated individually before anything is saved.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

use warung_core::{MenuItem, MenuPatch, NewMenu};

use crate::auth::{AdminUser, CurrentUser};
use crate::error::ApiError;
use crate::state::AppState;

use super::{message, success};

/// GET /api/menus
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let menus = state.db.menus().list().await?;
    Ok(success(menus))
}

/// GET /api/menus/{id}
pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let menu = state
        .db
        .menus()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("menu not found"))?;

    Ok(success(menu))
}

/// POST /api/menus (admin)
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(req): Json<NewMenu>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let menu = state.db.menus().create(&req).await?;

    info!(id = %menu.id, name = %menu.name, price = %menu.price, by = %admin.id, "Menu item created");

    Ok((StatusCode::CREATED, success(menu)))
}

/// PUT /api/menus/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
    Json(patch): Json<MenuPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let menu = apply_patch(&state, id, patch).await?;
    Ok(success(menu))
}

/// PATCH /api/menus/{id}/availability
///
/// Same patch semantics as the admin update; cashiers use it to mark
/// items sold out mid-shift.
pub async fn update_availability(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i64>,
    Json(patch): Json<MenuPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let menu = apply_patch(&state, id, patch).await?;
    Ok(success(menu))
}

/// DELETE /api/menus/{id} (admin)
pub async fn remove(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.menus().delete(id).await?;

    info!(id = %id, by = %admin.id, "Menu item deleted");

    Ok(message("deleted"))
}

/// Fetches, patches and saves a menu item.
async fn apply_patch(state: &AppState, id: i64, patch: MenuPatch) -> Result<MenuItem, ApiError> {
    let mut menu = state
        .db
        .menus()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("menu not found"))?;

    patch.apply(&mut menu)?;

    let updated = state.db.menus().update(&menu).await?;

    info!(id = %updated.id, "Menu item updated");

    Ok(updated)
}
