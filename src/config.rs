//! Environment-driven configuration with CLI overrides.

use crate::euris;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path.
    pub database: String,
    /// Bind address for the HTTP listener.
    pub bind: String,
    /// Listener port.
    pub port: u16,
    /// Base URL of the EuRIS tracks API.
    pub euris_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: "trackship.sqlite".to_string(),
            bind: "0.0.0.0".to_string(),
            port: 8080,
            euris_base_url: euris::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to
    /// defaults for anything unset.
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            database: env::var("TRACKSHIP_DB").unwrap_or(defaults.database),
            bind: env::var("TRACKSHIP_BIND").unwrap_or(defaults.bind),
            port: try_parse("TRACKSHIP_PORT", defaults.port),
            euris_base_url: env::var("TRACKSHIP_EURIS_URL").unwrap_or(defaults.euris_base_url),
        }
    }
}

fn try_parse<T: FromStr + Display + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("invalid {key} value {raw:?}, using default {default}");
            default
        }),
        Err(_) => default,
    }
}
