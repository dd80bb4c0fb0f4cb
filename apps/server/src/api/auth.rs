//! Account registration, login and session introspection.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use warung_core::validation::{validate_email, validate_password};
use warung_core::{NewUser, Role, User};

use crate::auth::{hash_password, verify_password, CurrentUser};
use crate::error::ApiError;
use crate::state::AppState;

use super::{message, success};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let password_hash = hash_password(&req.password)?;
    let user = state
        .db
        .users()
        .create(&NewUser {
            name: req.name,
            email: req.email,
            password_hash,
            role: req.role.unwrap_or_default(),
        })
        .await?;

    info!(id = %user.id, email = %user.email, "User registered");

    Ok((StatusCode::CREATED, message("registered")))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.db.users().find_by_email(&req.email).await?;

    let Some(user) = user else {
        warn!(email = %req.email, "Login for unknown email");
        return Err(ApiError::unauthenticated("invalid credentials"));
    };

    if !verify_password(&req.password, &user.password_hash) {
        warn!(email = %req.email, "Login with wrong password");
        return Err(ApiError::unauthenticated("invalid credentials"));
    }

    let token = state.jwt.generate_token(user.id)?;

    info!(id = %user.id, "User logged in");

    Ok(success(LoginResponse { token, user }))
}

/// GET /api/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    success(user)
}
