//! Process configuration from environment variables.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SECRET: &str = "secret";
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_STOCK_DUMP_PATH: &str = "routes/stock_dump.json";
pub const DEFAULT_SALES_DUMP_PATH: &str = "routes/sales_dump.json";
pub const DEFAULT_TOKEN_FILE: &str = "routes/LogPas.txt";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value: {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub auth_secret_key: String,
    pub workers: usize,
    pub stock_dump_path: PathBuf,
    pub sales_dump_path: PathBuf,
    pub token_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            auth_secret_key: DEFAULT_SECRET.to_string(),
            workers: DEFAULT_WORKERS,
            stock_dump_path: PathBuf::from(DEFAULT_STOCK_DUMP_PATH),
            sales_dump_path: PathBuf::from(DEFAULT_SALES_DUMP_PATH),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    ///
    /// `WORKERS` falls back to the default when it is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };

        let workers = get("WORKERS")
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(defaults.workers);

        Ok(Self {
            port,
            auth_secret_key: get("AUTH_SECRET_KEY").unwrap_or(defaults.auth_secret_key),
            workers,
            stock_dump_path: get("STOCK_DUMP_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.stock_dump_path),
            sales_dump_path: get("SALES_DUMP_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.sales_dump_path),
            token_file: get("TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_file),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
