//! Application configuration loaded from environment.

use std::net::SocketAddr;

/// Application configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address, built from `HOST` and `PORT` (e.g. `0.0.0.0:3000`).
    pub server_addr: SocketAddr,
    /// SQLite connection URL. The file is created when missing.
    pub database_url: String,
    /// Upper bound on pooled SQLite connections.
    pub db_max_connections: u32,
    /// JWT signing secret. Required.
    pub jwt_secret: String,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let server_addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://database.sqlite".to_string());
        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigLoadError::InvalidMaxConnections)?,
            None => 5,
        };

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigLoadError::MissingJwtSecret)?;
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            server_addr,
            database_url,
            db_max_connections,
            jwt_secret,
            log_level,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid HOST/PORT")]
    InvalidServerAddr,
    #[error("Invalid DB_MAX_CONNECTIONS")]
    InvalidMaxConnections,
    #[error("JWT_SECRET must be set")]
    MissingJwtSecret,
}
