//! Server configuration from the environment.
//!
//! `HOST` (default 0.0.0.0), `PORT` (default 8080), `DATA_DIR` (default
//! `data`, where saved projects go) and `INACTIVITY_HOURS` (default 12, idle
//! projects are dropped from memory after this long). Malformed values fall
//! back to the default.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub inactivity_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            inactivity_timeout: Duration::from_secs(12 * 3600),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let data_dir = lookup("DATA_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let inactivity_timeout = lookup("INACTIVITY_HOURS")
            .and_then(|h| h.parse::<u64>().ok())
            .filter(|h| *h > 0)
            .map(|h| Duration::from_secs(h * 3600))
            .unwrap_or(defaults.inactivity_timeout);
        Self {
            host,
            port,
            data_dir,
            inactivity_timeout,
        }
    }
}
