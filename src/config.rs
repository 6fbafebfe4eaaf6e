use std::env;

use anyhow::{Context, Result};

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Everything
/// has a sensible default — Ember runs out of the box.
pub struct Config {
    pub db_path: String,
    /// Port for `ember serve` (EMBER_PORT, default 8000).
    pub port: u16,
    /// Bind address for `ember serve` (EMBER_BIND, default 127.0.0.1).
    pub bind: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let port = match env::var("EMBER_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("EMBER_PORT is not a valid port: {value}"))?,
            Err(_) => 8000,
        };

        Ok(Self {
            db_path: env::var("EMBER_DB_PATH").unwrap_or_else(|_| "./ember.db".to_string()),
            port,
            bind: env::var("EMBER_BIND").unwrap_or_else(|_| "127.0.0.1".to_string()),
        })
    }
}
