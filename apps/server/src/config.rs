//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults; a `.env` file is honored when present (loaded in `main`).

use std::env;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// JWT access token lifetime in seconds
    pub jwt_lifetime_secs: i64,

    /// Allowed CORS origin for the web frontend
    pub frontend_origin: String,

    /// Directory where uploaded images land (served at /uploads)
    pub upload_dir: String,

    /// Payment-method label used when the client leaves the field empty
    pub default_payment_method: String,

    /// Per-listener buffer size for the notification fan-out.
    /// When a listener's buffer is full, messages to it are dropped.
    pub notify_buffer: usize,

    /// Seed admin account credentials (created at startup if missing)
    pub admin_email: String,
    pub admin_password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT"))?,

            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "warung.db".to_string()),

            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                // In production this MUST be set via environment variable
                "warung-dev-secret-change-in-production".to_string()
            }),

            jwt_lifetime_secs: env::var("JWT_LIFETIME_SECS")
                .unwrap_or_else(|_| "3600".to_string()) // 1 hour
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_LIFETIME_SECS"))?,

            frontend_origin: env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5554".to_string()),

            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),

            default_payment_method: env::var("DEFAULT_PAYMENT_METHOD")
                .unwrap_or_else(|_| warung_core::DEFAULT_PAYMENT_METHOD.to_string()),

            notify_buffer: env::var("NOTIFY_BUFFER")
                .unwrap_or_else(|_| "16".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("NOTIFY_BUFFER"))?,

            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@warung.local".to_string()),

            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
        };

        if config.notify_buffer == 0 {
            return Err(ConfigError::InvalidValue("NOTIFY_BUFFER"));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(&'static str),
}
