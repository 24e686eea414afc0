//! `relgraph` Configuration Module
//!
//! Provides configuration file support via `relgraph.toml`, environment variables,
//! and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (API)
//! 2. Environment variables (`RELGRAPH_*`)
//! 3. Configuration file (`relgraph.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Default factory key for edge collections.
pub const DEFAULT_EDGE_LIST_KIND: &str = "EdgeList";

/// Default factory key for node collections.
pub const DEFAULT_NODE_LIST_KIND: &str = "NodeList";

/// Default column suffix for endpoint references.
pub const DEFAULT_ID_SUFFIX: &str = "ID";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Where a caller-supplied filter on `NodeList::to` / `NodeList::from` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStage {
    /// Narrow the adjacent nodes produced by the hop (default).
    #[default]
    AfterExpansion,
    /// Narrow the intermediate edges before they are projected to nodes.
    BeforeExpansion,
}

/// Collection factory section.
///
/// Maps logical collection names to registered kinds. Per-class overrides
/// win over the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Kind used for edge collections.
    pub edge_list: String,
    /// Kind used for node collections.
    pub node_list: String,
    /// Edge class -> kind.
    pub edge_list_overrides: HashMap<String, String>,
    /// Node class -> kind.
    pub node_list_overrides: HashMap<String, String>,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            edge_list: DEFAULT_EDGE_LIST_KIND.to_string(),
            node_list: DEFAULT_NODE_LIST_KIND.to_string(),
            edge_list_overrides: HashMap::new(),
            node_list_overrides: HashMap::new(),
        }
    }
}

impl FactoryConfig {
    /// Returns the kind for edge lists of `edge_class`, honouring overrides.
    #[must_use]
    pub fn edge_list_kind(&self, edge_class: &str) -> &str {
        self.edge_list_overrides
            .get(edge_class)
            .map_or(self.edge_list.as_str(), String::as_str)
    }

    /// Returns the kind for node lists of `node_class`, honouring overrides.
    #[must_use]
    pub fn node_list_kind(&self, node_class: &str) -> &str {
        self.node_list_overrides
            .get(node_class)
            .map_or(self.node_list.as_str(), String::as_str)
    }
}

/// Traversal section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalSettings {
    /// Stage at which caller filters are applied.
    pub filter_stage: FilterStage,
    /// Suffix appended to endpoint roles for edge types that don't set one.
    pub id_suffix: String,
}

impl Default for TraversalSettings {
    fn default() -> Self {
        Self {
            filter_stage: FilterStage::AfterExpansion,
            id_suffix: DEFAULT_ID_SUFFIX.to_string(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
    /// Log format: text or json.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Main `relgraph` configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RelGraphConfig {
    /// Collection factory configuration.
    pub factory: FactoryConfig,
    /// Traversal configuration.
    pub traversal: TraversalSettings,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl RelGraphConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("relgraph.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("RELGRAPH_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.factory.edge_list.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "factory.edge_list".to_string(),
                message: "kind name must not be empty".to_string(),
            });
        }

        if self.factory.node_list.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "factory.node_list".to_string(),
                message: "kind name must not be empty".to_string(),
            });
        }

        for (section, overrides) in [
            ("factory.edge_list_overrides", &self.factory.edge_list_overrides),
            ("factory.node_list_overrides", &self.factory.node_list_overrides),
        ] {
            if let Some((class, _)) = overrides.iter().find(|(_, kind)| kind.trim().is_empty()) {
                return Err(ConfigError::InvalidValue {
                    key: format!("{section}.{class}"),
                    message: "kind name must not be empty".to_string(),
                });
            }
        }

        if self.traversal.id_suffix.is_empty()
            || !self
                .traversal
                .id_suffix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::InvalidValue {
                key: "traversal.id_suffix".to_string(),
                message: format!(
                    "value '{}' must be a non-empty identifier",
                    self.traversal.id_suffix
                ),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.format".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        Ok(())
    }

    /// Returns the kind configured for edge lists of `edge_class`.
    #[must_use]
    pub fn edge_list_kind(&self, edge_class: &str) -> &str {
        self.factory.edge_list_kind(edge_class)
    }

    /// Returns the kind configured for node lists of `node_class`.
    #[must_use]
    pub fn node_list_kind(&self, node_class: &str) -> &str {
        self.factory.node_list_kind(node_class)
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
