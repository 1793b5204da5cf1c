//! Service configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `PORT`: HTTP port (default: 8080)
//! - `STORE_BACKEND`: `mongo` (default) or `memory`
//! - `MONGO_URI`, `MONGO_DB`, `MONGO_COLLECTION`: document store location
//! - `MONGO_TIMEOUT_SECS`: connect and server-selection timeout (default: 5)
//! - `SHUTDOWN_GRACE_SECS`: how long in-flight requests may drain (default: 5)

use std::time::Duration;

use planets_lib::MongoConfig;

/// Which document store the service persists planets in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Mongo,
    /// Process-local store; data is lost on exit.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Runtime configuration for the planets service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    pub store: StoreBackend,
    pub mongo: MongoConfig,
    pub shutdown_grace: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            store: StoreBackend::default(),
            mongo: MongoConfig::default(),
            shutdown_grace: Duration::from_secs(5),
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set keys that fail to parse are an
    /// error rather than being silently ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::invalid("PORT", v))?,
            None => defaults.port,
        };

        let store = match lookup("STORE_BACKEND") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::invalid("STORE_BACKEND", v))?,
            None => defaults.store,
        };

        let mongo = MongoConfig {
            uri: lookup("MONGO_URI").unwrap_or(defaults.mongo.uri),
            database: lookup("MONGO_DB").unwrap_or(defaults.mongo.database),
            collection: lookup("MONGO_COLLECTION").unwrap_or(defaults.mongo.collection),
            timeout: seconds(&lookup, "MONGO_TIMEOUT_SECS")?.unwrap_or(defaults.mongo.timeout),
        };

        let shutdown_grace =
            seconds(&lookup, "SHUTDOWN_GRACE_SECS")?.unwrap_or(defaults.shutdown_grace);

        Ok(Self {
            port,
            store,
            mongo,
            shutdown_grace,
        })
    }
}

fn seconds<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            v.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::invalid(key, v))
        })
        .transpose()
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed.
    InvalidValue { key: &'static str, value: String },
}

impl ConfigError {
    fn invalid(key: &'static str, value: String) -> Self {
        ConfigError::InvalidValue { key, value }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value {:?} for {}", value, key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
