//! # Configuration Management
//!
//! Centralized configuration for the codec crate.
//!
//! Covers the connection pool used by the storage layer, the reference
//! scope resolver, and logging output.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment overrides via `from_env()` (`SANCTION_CODEC_*`)

use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::Level;

/// Default time to wait for a pooled connection
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default upper bound on checked-out connections
pub const DEFAULT_MAX_CONNECTIONS: usize = 10;

/// Default key for the global scope
pub const DEFAULT_GLOBAL_SCOPE_KEY: &str = "*";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CodecConfig {
    /// Connection pool configuration
    #[serde(default)]
    pub pool: PoolConfig,

    /// Scope resolver configuration
    #[serde(default)]
    pub scope: ScopeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CodecConfig {
    /// Load configuration from a TOML file
    ///
    /// I/O failures surface as [`CodecError::Io`], bad content as [`CodecError::ConfigError`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| CodecError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(max) = std::env::var("SANCTION_CODEC_MAX_CONNECTIONS") {
            config.pool.max_connections = max.parse::<usize>().map_err(|e| {
                CodecError::ConfigError(format!("Invalid SANCTION_CODEC_MAX_CONNECTIONS: {e}"))
            })?;
        }

        if let Ok(timeout) = std::env::var("SANCTION_CODEC_ACQUIRE_TIMEOUT_MS") {
            let millis = timeout.parse::<u64>().map_err(|e| {
                CodecError::ConfigError(format!("Invalid SANCTION_CODEC_ACQUIRE_TIMEOUT_MS: {e}"))
            })?;
            config.pool.acquire_timeout = Duration::from_millis(millis);
        }

        if let Ok(key) = std::env::var("SANCTION_CODEC_GLOBAL_SCOPE_KEY") {
            config.scope.global_key = key;
        }

        if let Ok(level) = std::env::var("SANCTION_CODEC_LOG_LEVEL") {
            config.logging.log_level = level.parse::<Level>().map_err(|_| {
                CodecError::ConfigError(format!("Invalid SANCTION_CODEC_LOG_LEVEL: {level}"))
            })?;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CodecError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate the configuration
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.pool.validate());
        errors.extend(self.scope.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CodecError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Connection pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolConfig {
    /// Maximum number of connections checked out at once
    pub max_connections: usize,

    /// How long `acquire()` waits before reporting the store unavailable
    #[serde(with = "duration_serde")]
    pub acquire_timeout: Duration,

    /// Idle connections kept for reuse
    pub idle_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            idle_capacity: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl PoolConfig {
    /// Validate pool configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_connections == 0 {
            errors.push("Max connections must be greater than 0".to_string());
        } else if self.max_connections > 1_000 {
            errors.push(format!(
                "Max connections very high: {} (maximum: 1000)",
                self.max_connections
            ));
        }

        if self.acquire_timeout.as_millis() < 10 {
            errors.push("Acquire timeout too short (minimum: 10ms)".to_string());
        } else if self.acquire_timeout.as_secs() > 600 {
            errors.push("Acquire timeout too long (maximum: 600s)".to_string());
        }

        if self.idle_capacity > self.max_connections {
            errors.push("Idle capacity cannot exceed max connections".to_string());
        }

        errors
    }
}

/// Scope resolver configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScopeConfig {
    /// Storage key used for the global scope
    pub global_key: String,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            global_key: DEFAULT_GLOBAL_SCOPE_KEY.to_string(),
        }
    }
}

impl ScopeConfig {
    /// Validate scope configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.global_key.is_empty() {
            errors.push("Global scope key cannot be empty".to_string());
        } else if self.global_key.len() > 32 {
            errors.push(format!(
                "Global scope key too long: {} characters (maximum: 32)",
                self.global_key.len()
            ));
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("sanction-codec"),
            log_level: Level::INFO,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for Duration serialization/deserialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = duration.as_millis() as u64;
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        level.to_string().to_lowercase().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
