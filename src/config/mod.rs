//! Environment-backed configuration.
//!
//! All settings come from the process environment (optionally seeded from a
//! `.env` file by `main`), with defaults suitable for local development.

use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Origin allowed to call the API from the dashboard, e.g. a Vite dev
    /// server. Empty disables CORS headers entirely.
    pub cors_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            database_url: "sqlite://portfolio.db?mode=rwc".to_string(),
            jwt_secret: String::new(),
            cors_origin: String::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.server_port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
            cors_origin: env::var("CORS_ORIGIN").unwrap_or_default(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
