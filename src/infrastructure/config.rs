//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: String,
    /// Directory holding uploaded avatar images
    pub uploads_dir: String,
    /// Largest accepted avatar upload, in bytes
    pub max_avatar_bytes: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "charkeeper.db".to_string()),
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()),
            max_avatar_bytes: env::var("MAX_AVATAR_BYTES")
                .unwrap_or_else(|_| "5242880".to_string())
                .parse()
                .context("MAX_AVATAR_BYTES must be a byte count")?,
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }
}
