//! Bot Configuration
//!
//! Configuration types for the order bot, loaded from environment variables
//! once at startup and passed by reference into
//! [`OrderSystem::start`](crate::lifecycle::OrderSystem::start).

use order_store::RedisSettings;
use std::time::Duration;

/// Which [`RecordStore`](order_store::RecordStore) backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// One Redis hash per day; survives restarts.
    #[default]
    Redis,
    /// In-process actor; lost on exit.
    Memory,
}

impl StorageBackend {
    /// Parse backend from string.
    pub fn from_str_case_insensitive(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue {
                key: "ORDER_STORE_BACKEND".to_string(),
                value: other.to_string(),
            }),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Redis => "redis",
            Self::Memory => "memory",
        }
    }
}

/// Chat bot credential.
#[derive(Clone)]
pub struct BotCredentials {
    token: String,
}

impl BotCredentials {
    pub const fn new(token: String) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for BotCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotCredentials")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Record store settings.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub redis: RedisSettings,
    /// Upper bound on every storage round trip.
    pub request_timeout: Duration,
    /// Mailbox capacity of the in-process store actor.
    pub actor_buffer: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            redis: RedisSettings::default(),
            request_timeout: Duration::from_millis(2000),
            actor_buffer: 32,
        }
    }
}

/// Complete bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub credentials: BotCredentials,
    pub storage: StorageSettings,
}

impl BotConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TELEGRAM_BOT_TOKEN` is missing or empty, or if a
    /// set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("TELEGRAM_BOT_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_string()))?;
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyValue("TELEGRAM_BOT_TOKEN".to_string()));
        }

        let defaults = StorageSettings::default();
        let backend = match lookup("ORDER_STORE_BACKEND") {
            Some(value) => StorageBackend::from_str_case_insensitive(&value)?,
            None => defaults.backend,
        };

        let redis = RedisSettings {
            host: lookup("REDIS_HOST").unwrap_or(defaults.redis.host),
            port: parse_or(&lookup, "REDIS_PORT", defaults.redis.port)?,
            db: parse_or(&lookup, "REDIS_DB", defaults.redis.db)?,
            password: lookup("REDIS_PASSWORD").filter(|p| !p.is_empty()),
        };

        let request_timeout = Duration::from_millis(parse_or(
            &lookup,
            "STORAGE_TIMEOUT_MS",
            defaults.request_timeout.as_millis() as u64,
        )?);
        let actor_buffer = parse_or(&lookup, "STORE_ACTOR_BUFFER", defaults.actor_buffer)?;
        // A bounded mailbox needs room for at least one request.
        if actor_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                key: "STORE_ACTOR_BUFFER".to_string(),
                value: actor_buffer.to_string(),
            });
        }

        Ok(Self {
            credentials: BotCredentials::new(token),
            storage: StorageSettings {
                backend,
                redis,
                request_timeout,
                actor_buffer,
            },
        })
    }
}

/// Configuration error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable is set but cannot be parsed.
    #[error("invalid value {value:?} for environment variable {key}")]
    InvalidValue { key: String, value: String },
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}
