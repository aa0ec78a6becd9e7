//! Centralized configuration (environment variables + defaults).
//!
//! Everything is read once at startup into [`AppConfig`] and validated there;
//! request handling never touches the environment.

use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PG_USER: &str = "postgres";
pub const DEFAULT_PG_HOST: &str = "localhost";
pub const DEFAULT_PG_DATABASE: &str = "restaurants_db";
pub const DEFAULT_PG_PASSWORD: &str = "123";
pub const DEFAULT_PG_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Connection parameters for the restaurants database.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub user: String,
    pub host: String,
    pub database: String,
    pub password: String,
    pub port: u16,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("user", &self.user)
            .field("host", &self.host)
            .field("database", &self.database)
            .field("password", &"***")
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_PG_USER.to_string(),
            host: DEFAULT_PG_HOST.to_string(),
            database: DEFAULT_PG_DATABASE.to_string(),
            password: DEFAULT_PG_PASSWORD.to_string(),
            port: DEFAULT_PG_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

impl DbConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            user: lookup("PG_USER").unwrap_or(defaults.user),
            host: lookup("PG_HOST").unwrap_or(defaults.host),
            database: lookup("PG_DATABASE").unwrap_or(defaults.database),
            password: lookup("PG_PASSWORD").unwrap_or(defaults.password),
            port: parse_var(&lookup, "PG_PORT", "a port number (1-65535)", defaults.port)?,
            max_connections: parse_var(
                &lookup,
                "PG_MAX_CONNECTIONS",
                "a positive integer",
                defaults.max_connections,
            )?,
            acquire_timeout: Duration::from_secs(parse_var(
                &lookup,
                "PG_ACQUIRE_TIMEOUT_SECS",
                "a number of seconds",
                defaults.acquire_timeout.as_secs(),
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user.trim().is_empty() {
            return Err(ConfigError::Empty("PG_USER"));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::Empty("PG_HOST"));
        }
        if self.database.trim().is_empty() {
            return Err(ConfigError::Empty("PG_DATABASE"));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                var: "PG_PORT",
                expected: "a port number (1-65535)",
                value: "0".to_string(),
            });
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "PG_MAX_CONNECTIONS",
                expected: "a positive integer",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw.parse().map_err(|_| ConfigError::Invalid {
            var: "BIND_ADDR",
            expected: "a socket address like 0.0.0.0:3000",
            value: raw.clone(),
        })?;
        Ok(Self { bind_addr })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db: DbConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            db: DbConfig::from_lookup(&lookup)?,
            server: ServerConfig::from_lookup(&lookup)?,
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value: raw,
        }),
    }
}
