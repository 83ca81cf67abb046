use std::num::NonZeroU32;

use anyhow::{Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://portfolio.db";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Origins that are always allowed, ahead of `FRONTEND_URL`.
const BUILTIN_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5173"];

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub frontend_url: String,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            db_max_connections: var_or("DB_MAX_CONNECTIONS", "5")
                .parse::<NonZeroU32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?
                .get(),
            frontend_url: var_or("FRONTEND_URL", DEFAULT_FRONTEND_URL),
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var_or("RUST_LOG", "info"),
        })
    }

    /// CORS allow-list: the built-in dev origins followed by the frontend origin, deduplicated.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = Vec::new();
        for origin in BUILTIN_ORIGINS
            .iter()
            .copied()
            .chain(std::iter::once(self.frontend_url.as_str()))
        {
            if !origins.iter().any(|o| o == origin) {
                origins.push(origin.to_string());
            }
        }
        origins
    }
}
