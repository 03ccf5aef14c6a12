//! Service configuration from environment variables.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime configuration.
///
/// Env vars (all optional):
/// - HOST: bind address (default 0.0.0.0)
/// - PORT: bind port (default 3000)
/// - CARDS_PATH: protocol record JSON file (default data/cards.json)
/// - HISTORY_LIMIT: history entries kept, newest first (default 300)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cards_path: PathBuf,
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cards_path: PathBuf::from("data/cards.json"),
            history_limit: 300,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: port })?;
        }
        if let Some(path) = lookup("CARDS_PATH") {
            config.cards_path = PathBuf::from(path);
        }
        if let Some(limit) = lookup("HISTORY_LIMIT") {
            config.history_limit = limit.parse().map_err(|_| ConfigError::Invalid {
                key: "HISTORY_LIMIT",
                value: limit,
            })?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
