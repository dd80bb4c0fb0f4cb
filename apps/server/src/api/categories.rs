//! Menu category listing and creation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use warung_core::validation::validate_category_name;

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::success;

#[derive(Debug, Deserialize)]
pub struct CategoryCreateRequest {
    pub name: String,
}

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state.db.categories().list().await?;
    Ok(success(categories))
}

/// POST /api/categories (admin)
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(req): Json<CategoryCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_category_name(&req.name)?;

    let category = state.db.categories().create(req.name.trim()).await?;

    info!(id = %category.id, name = %category.name, by = %admin.id, "Category created");

    Ok((StatusCode::CREATED, success(category)))
}
