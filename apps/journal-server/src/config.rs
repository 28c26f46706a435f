//! Centralized configuration for journal-server.
//!
//! All environment variables are loaded and validated at startup to fail fast
//! on misconfiguration rather than at request time.

use std::net::{IpAddr, SocketAddr};

use app_common::{parse_flag, parse_var, ConfigError, LogFormat, StorageConfig};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address (`GRPC_HOST`, default 0.0.0.0; `GRPC_PORT`, default 50051)
    pub grpc_addr: SocketAddr,
    /// Backend choice (`MYSQL_DSN`) and pool sizing
    pub storage: StorageConfig,
    /// Pre-populate the sample journal on startup (`SEED_SAMPLE_JOURNAL`, default true)
    pub seed_sample_journal: bool,
    /// Log format (`LOG_FORMAT`)
    pub log_format: LogFormat,
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&app_common::env_lookup)
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host: IpAddr = parse_var(lookup, "GRPC_HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port: u16 = parse_var(lookup, "GRPC_PORT", 50051)?;
        let storage = StorageConfig::from_lookup(lookup)?;
        let seed_sample_journal = parse_flag(lookup, "SEED_SAMPLE_JOURNAL", true)?;
        let log_format = LogFormat::parse(&lookup("LOG_FORMAT").unwrap_or_default());

        Ok(Self {
            grpc_addr: SocketAddr::new(host, port),
            storage,
            seed_sample_journal,
            log_format,
        })
    }
}
