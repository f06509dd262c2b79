//! Configuration schema definitions.
//!
//! A router configuration file seeds the initial environment and tunes how
//! provider endpoints are derived from it. All types derive Serde traits for
//! deserialization from TOML.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::keys;
use crate::environment::{Environment, Properties, PropertyValue};

/// Root configuration for a routing context.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Endpoint derivation settings.
    pub resolution: ResolutionConfig,

    /// Initial environment properties.
    pub environment: BTreeMap<String, ConfigValue>,

    /// Property table for `${...}` expressions.
    pub expansion: ExpansionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl RouterConfig {
    /// Build a fresh environment holding the configured properties.
    pub fn build_environment(&self) -> Environment {
        let properties: Properties = self
            .environment
            .iter()
            .map(|(k, v)| (k.clone(), PropertyValue::from(v.clone())))
            .collect();
        Environment::from(properties)
    }
}

/// Endpoint derivation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Protocol for legacy connections without TLS.
    pub default_protocol: String,

    /// Protocol for legacy connections with TLS enabled.
    pub default_secure_protocol: String,

    /// Fail on `${...}` references that resolve to nothing.
    pub strict_expansion: bool,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            default_protocol: keys::DEFAULT_PROTOCOL.to_string(),
            default_secure_protocol: keys::DEFAULT_SECURE_PROTOCOL.to_string(),
            strict_expansion: false,
        }
    }
}

/// Property table for expression expansion.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExpansionConfig {
    pub properties: BTreeMap<String, String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// A scalar environment value as written in the config file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl From<ConfigValue> for PropertyValue {
    fn from(value: ConfigValue) -> Self {
        match value {
            ConfigValue::Flag(b) => PropertyValue::Flag(b),
            ConfigValue::Number(n) => PropertyValue::Number(n),
            ConfigValue::Text(s) => PropertyValue::Text(s),
        }
    }
}
