//! Startup helpers shared by the catalogue binaries.
//!
//! Environment is read once at startup into plain values; nothing here is
//! consulted again at request time. Parsing goes through a lookup function
//! so it can be exercised without touching the process environment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use mysql_adapter::PoolSettings;
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

/// Variable selecting the relational backend.
pub const MYSQL_DSN_VAR: &str = "MYSQL_DSN";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
#[error("Configuration error for {field}: {message}")]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

/// Storage backend chosen at startup.
#[derive(Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Volatile in-process store (data lost on restart).
    Memory,
    /// MySQL reached through this connection string, used verbatim.
    MySql { dsn: String },
}

impl StorageBackend {
    /// A set, non-blank DSN selects MySQL; anything else means memory.
    pub fn from_dsn(dsn: Option<String>) -> Self {
        match dsn {
            Some(dsn) if !dsn.trim().is_empty() => Self::MySql { dsn },
            _ => Self::Memory,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::MySql { .. } => "mysql",
        }
    }
}

// The DSN usually carries credentials; keep it out of logs.
impl fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            Self::MySql { .. } => f.write_str("MySql { dsn: <redacted> }"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Read a variable from the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse `key` with `FromStr`, falling back to `default` when unset or blank.
pub fn parse_var<T>(
    lookup: &dyn Fn(&str) -> Option<String>,
    field: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(field).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError {
            field,
            message: format!("invalid value '{}': {}", raw, e),
        }),
    }
}

/// Parse a boolean flag (`1|true|yes` / `0|false|no`).
pub fn parse_flag(
    lookup: &dyn Fn(&str) -> Option<String>,
    field: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(field).filter(|v| !v.trim().is_empty()) else {
        return Ok(default);
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError {
            field,
            message: format!("expected a boolean, got '{}'", raw),
        }),
    }
}

/// Storage choice plus pool sizing, shared by every binary.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub pool: PoolSettings,
}

impl StorageConfig {
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = StorageBackend::from_dsn(lookup(MYSQL_DSN_VAR));
        let defaults = PoolSettings::default();
        let max_connections =
            parse_var(lookup, "MYSQL_MAX_CONNECTIONS", defaults.max_connections)?;
        if max_connections == 0 {
            return Err(ConfigError {
                field: "MYSQL_MAX_CONNECTIONS",
                message: "must be at least 1".into(),
            });
        }
        let acquire_secs = parse_var(
            lookup,
            "MYSQL_ACQUIRE_TIMEOUT_SECS",
            defaults.acquire_timeout.as_secs(),
        )?;
        Ok(Self {
            backend,
            pool: PoolSettings {
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_secs),
            },
        })
    }
}

/// Install the global tracing subscriber. Logs go to stderr so stdout stays
/// free for command output.
pub fn init_tracing(format: &LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => {
            registry
                .with(
                    tracing_fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(tracing_fmt::time::SystemTime)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Pretty => {
            registry
                .with(
                    tracing_fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
