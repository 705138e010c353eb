//! # Config Adapters
//!
//! - `StaticConfigProvider` - in-code configuration, always available
//! - `TomlConfigProvider` - config file loading (requires "config" feature)

use crate::domain::DhtConfig;
use crate::ports::ConfigProvider;

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider with hardcoded values.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: DhtConfig,
}

impl StaticConfigProvider {
    /// Create with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with the specified DHT config.
    #[must_use]
    pub fn with_config(mut self, config: DhtConfig) -> Self {
        self.config = config;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn dht_config(&self) -> DhtConfig {
        self.config.clone()
    }
}

// ============================================================================
// TomlConfigProvider - Config file loading (requires "config" feature)
// ============================================================================

#[cfg(feature = "config")]
mod toml_config {
    use super::*;
    use crate::domain::{ConfigError, DhtError, EvictionPolicy};
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;

    #[derive(Debug, Deserialize)]
    struct ConfigFile {
        #[serde(default)]
        dht: DhtConfigFile,
    }

    #[derive(Debug, Deserialize, Default)]
    struct DhtConfigFile {
        k: Option<usize>,
        replication_factor: Option<usize>,
        table_size: Option<usize>,
        eviction: Option<String>,
    }

    /// TOML-based configuration provider.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [dht]
    /// k = 3
    /// replication_factor = 2
    /// table_size = 160
    /// eviction = "oldest_inserted"   # or "least_recently_seen"
    /// ```
    ///
    /// Missing keys fall back to `DhtConfig::default()`.
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        config: DhtConfig,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// `DhtError::Config` if the file cannot be read or parsed,
        /// `DhtError::InvalidConfig` if the values do not validate.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DhtError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, DhtError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

            let defaults = DhtConfig::default();
            let dc = file.dht;
            let eviction = match dc.eviction.as_deref() {
                Some(name) => name.parse::<EvictionPolicy>()?,
                None => defaults.eviction,
            };
            let config = DhtConfig {
                k: dc.k.unwrap_or(defaults.k),
                replication_factor: dc.replication_factor.unwrap_or(defaults.replication_factor),
                table_size: dc.table_size.unwrap_or(defaults.table_size),
                eviction,
            };
            config.validate()?;

            Ok(Self { config })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn dht_config(&self) -> DhtConfig {
            self.config.clone()
        }
    }
}

#[cfg(feature = "config")]
pub use toml_config::TomlConfigProvider;
