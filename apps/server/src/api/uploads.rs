//! Product image upload.
//!
//! Multipart upload (field name: `file`) saved under the configured
//! upload directory with a generated name; the returned URL is served
//! statically at `/uploads/{name}`.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::success;

/// POST /api/uploads
pub async fn upload(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        // Keep only the extension of the client filename; the stored
        // name is generated to avoid collisions and path tricks.
        let extension = field
            .file_name()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        if data.is_empty() {
            return Err(ApiError::bad_request("file is empty"));
        }

        let filename = format!("{}{}", Uuid::new_v4(), extension);
        let dir = Path::new(&state.config.upload_dir);

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ApiError::internal(format!("cannot create upload dir: {}", e)))?;
        tokio::fs::write(dir.join(&filename), &data)
            .await
            .map_err(|e| ApiError::internal(format!("failed to save file: {}", e)))?;

        info!(file = %filename, bytes = data.len(), by = %user.id, "File uploaded");

        let url = format!("/uploads/{}", filename);
        return Ok((StatusCode::CREATED, success(json!({ "url": url }))));
    }

    Err(ApiError::bad_request("file is required"))
}
