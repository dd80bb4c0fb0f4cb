//! Shared application state.
//!
//! One instance is built at startup and handed to every handler through
//! axum's `State` extractor. Everything inside is cheap to clone: the
//! database clones share a pool, the rest are `Arc`s.

use std::sync::Arc;

use warung_db::Database;

use crate::auth::JwtManager;
use crate::config::ServerConfig;
use crate::notify::Notifier;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ServerConfig>,
    pub jwt: Arc<JwtManager>,
    pub notifier: Arc<Notifier>,
}

impl AppState {
    /// Builds the process-wide state from loaded configuration.
    ///
    /// The notifier is constructed exactly once here; components publish
    /// and subscribe through this handle rather than any global.
    pub fn new(db: Database, config: ServerConfig) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_lifetime_secs);
        let notifier = Notifier::new(config.notify_buffer);

        AppState {
            db,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            notifier: Arc::new(notifier),
        }
    }
}
