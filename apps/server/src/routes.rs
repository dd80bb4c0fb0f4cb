//! Route tree and HTTP middleware.
//!
//! Authorization is enforced per handler through the extractors in
//! [`crate::auth`]; this module only wires paths to handlers and hangs
//! the CORS/trace layers on top.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api;
use crate::config::ServerConfig;
use crate::state::AppState;

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let uploads = ServeDir::new(&state.config.upload_dir);

    Router::new()
        // auth
        .route("/api/auth/register", post(api::auth::register))
        .route("/api/auth/login", post(api::auth::login))
        .route("/api/auth/me", get(api::auth::me))
        // catalog
        .route(
            "/api/categories",
            get(api::categories::list).post(api::categories::create),
        )
        .route("/api/menus", get(api::menus::list).post(api::menus::create))
        .route(
            "/api/menus/{id}",
            get(api::menus::find)
                .put(api::menus::update)
                .delete(api::menus::remove),
        )
        .route(
            "/api/menus/{id}/availability",
            patch(api::menus::update_availability),
        )
        // sales
        .route(
            "/api/transactions",
            get(api::transactions::list).post(api::transactions::create),
        )
        .route("/api/transactions/{id}", get(api::transactions::find))
        // reports
        .route("/api/reports/daily", get(api::reports::daily))
        .route("/api/reports/aggregate", get(api::reports::aggregate))
        .route("/api/reports/daily/pdf", get(api::reports::export_pdf))
        .route("/api/reports/daily/excel", get(api::reports::export_excel))
        // live notifications
        .route("/api/notifications/stream", get(api::notifications::stream))
        // uploads
        .route("/api/uploads", post(api::uploads::upload))
        .nest_service("/uploads", uploads)
        // middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the web frontend: one allowed origin, credentials on.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 60 * 60));

    match config.frontend_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            warn!(origin = %config.frontend_origin, "Invalid FRONTEND_ORIGIN, CORS disabled");
            layer
        }
    }
}
