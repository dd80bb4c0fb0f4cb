//! # Warung POS Server
//!
//! HTTP API for the warung point-of-sale backend.
//!
//! ## Startup Sequence
//! ```text
//! .env ──► config ──► SQLite pool + migrations ──► admin seed
//!                                │
//!                                ▼
//!            AppState { db, config, jwt, notifier }
//!                                │
//!                                ▼
//!            axum router ──► serve until SIGINT/SIGTERM
//! ```

mod api;
mod auth;
mod config;
mod error;
mod notify;
mod render;
mod routes;
mod state;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use warung_core::{NewUser, Role};
use warung_db::{Database, DbConfig};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real deployments set the environment directly
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Warung POS server...");

    let config = ServerConfig::load().context("failed to load configuration")?;
    info!(
        port = config.http_port,
        db = %config.database_path,
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.database_path))
        .await
        .context("failed to open database")?;
    info!("Database ready");

    seed_admin(&db, &config).await?;

    let state = AppState::new(db.clone(), config.clone());
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Creates the admin account on first boot, so a fresh install can log
/// in and start adding the menu.
async fn seed_admin(db: &Database, config: &ServerConfig) -> anyhow::Result<()> {
    if db.users().find_by_email(&config.admin_email).await?.is_some() {
        return Ok(());
    }

    let password_hash = auth::hash_password(&config.admin_password)?;
    db.users()
        .create(&NewUser {
            name: "Admin".to_string(),
            email: config.admin_email.clone(),
            password_hash,
            role: Role::Admin,
        })
        .await?;

    info!(email = %config.admin_email, "Created admin user");
    Ok(())
}

/// Graceful shutdown on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
