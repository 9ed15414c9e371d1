//! Application configuration management

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Constructed once at startup and passed by reference into the services
/// that need it; nothing reads the environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// TMDB API key, appended to every upstream call
    pub tmdb_api_key: String,

    /// TMDB API base address
    pub tmdb_base_url: String,

    /// Upper bound on a single upstream call, in seconds
    pub tmdb_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A missing or empty `TMDB_API_KEY` is fatal: the gateway refuses to
    /// start rather than fail every query at request time.
    pub fn from_env() -> Result<Self> {
        let tmdb_api_key = env::var("TMDB_API_KEY").context("TMDB_API_KEY is required")?;
        if tmdb_api_key.is_empty() {
            anyhow::bail!("TMDB_API_KEY must not be empty");
        }

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("Invalid PORT")?,

            tmdb_api_key,

            tmdb_base_url: env::var("TMDB_BASE_URL")
                .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string()),

            tmdb_timeout_secs: env::var("TMDB_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("Invalid TMDB_TIMEOUT_SECS")?,
        })
    }
}
