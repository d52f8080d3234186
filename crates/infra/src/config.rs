//! Runtime configuration read from the process environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `STOCKLINE_BIND_ADDR` | `0.0.0.0:8080` | HTTP listen address |
//! | `DATABASE_URL` | unset | Postgres URL; in-memory store when unset |
//! | `STOCKLINE_ID_STRATEGY` | `sequence` | `sequence` or `generated` |
//! | `STOCKLINE_DB_MAX_CONNECTIONS` | `5` | Postgres pool size |

use std::net::SocketAddr;
use std::str::FromStr;

use stockline_core::IdStrategy;

pub const BIND_ADDR_VAR: &str = "STOCKLINE_BIND_ADDR";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const ID_STRATEGY_VAR: &str = "STOCKLINE_ID_STRATEGY";
pub const DB_MAX_CONNECTIONS_VAR: &str = "STOCKLINE_DB_MAX_CONNECTIONS";

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("incompatible configuration: {0}")]
    Incompatible(String),
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub id_strategy: IdStrategy,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr: SocketAddr = parse_or(
            get(BIND_ADDR_VAR),
            BIND_ADDR_VAR,
            SocketAddr::from(DEFAULT_BIND_ADDR),
        )?;
        let id_strategy: IdStrategy =
            parse_or(get(ID_STRATEGY_VAR), ID_STRATEGY_VAR, IdStrategy::default())?;
        let db_max_connections: u32 = parse_or(
            get(DB_MAX_CONNECTIONS_VAR),
            DB_MAX_CONNECTIONS_VAR,
            DEFAULT_DB_MAX_CONNECTIONS,
        )?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: DB_MAX_CONNECTIONS_VAR,
                value: "0".into(),
                reason: "pool needs at least one connection".into(),
            });
        }

        let database_url = get(DATABASE_URL_VAR);
        match &database_url {
            None => tracing::warn!("DATABASE_URL not set; using in-memory store"),
            Some(_) if id_strategy == IdStrategy::Generated => {
                return Err(ConfigError::Incompatible(format!(
                    "{ID_STRATEGY_VAR}=generated cannot be used with the Postgres store"
                )));
            }
            Some(_) => {}
        }

        Ok(Self {
            bind_addr,
            database_url,
            id_strategy,
            db_max_connections,
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
