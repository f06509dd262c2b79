//! Ordered plugin registry.
//!
//! # Responsibilities
//! - Hold provider and context plugins in discovery order
//! - Filter out plugins that failed to load, with a diagnostic
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc, read without locks)
//! - An empty registry is valid; failure happens only when a resolution exhausts every tier

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::observability::metrics;
use crate::plugin::{ContextFactory, Plugin, ProviderFactory};

/// A plugin that could not be loaded during discovery.
#[derive(Debug, Clone, Error)]
#[error("failed to load plugin `{plugin}`: {reason}")]
pub struct PluginLoadError {
    pub plugin: String,
    pub reason: String,
}

impl PluginLoadError {
    pub fn new(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }
}

/// Provider and context plugins, in priority order.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    providers: Vec<Arc<dyn ProviderFactory>>,
    contexts: Vec<Arc<dyn ContextFactory>>,
}

impl PluginRegistry {
    /// A registry without plugins.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> PluginRegistryBuilder {
        PluginRegistryBuilder::default()
    }

    /// Build from discovery output, keeping order and skipping failed plugins.
    pub fn from_discovered<I>(discovered: I) -> Self
    where
        I: IntoIterator<Item = Result<Plugin, PluginLoadError>>,
    {
        let mut builder = Self::builder();
        for item in discovered {
            match item {
                Ok(plugin) => builder = builder.plugin(plugin),
                Err(e) => {
                    tracing::warn!(plugin = %e.plugin, error = %e.reason, "Skipping plugin that failed to load");
                    metrics::record_plugin_load_failure();
                }
            }
        }
        let registry = builder.build();
        tracing::debug!(
            providers = registry.providers.len(),
            contexts = registry.contexts.len(),
            "Plugin registry built"
        );
        registry
    }

    pub fn providers(&self) -> &[Arc<dyn ProviderFactory>] {
        &self.providers
    }

    pub fn contexts(&self) -> &[Arc<dyn ContextFactory>] {
        &self.contexts
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty() && self.contexts.is_empty()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("providers", &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>())
            .field("contexts", &self.contexts.iter().map(|c| c.name()).collect::<Vec<_>>())
            .finish()
    }
}

/// Appends plugins in the order they should be consulted.
#[derive(Default)]
pub struct PluginRegistryBuilder {
    providers: Vec<Arc<dyn ProviderFactory>>,
    contexts: Vec<Arc<dyn ContextFactory>>,
}

impl PluginRegistryBuilder {
    pub fn plugin(self, plugin: Plugin) -> Self {
        match plugin {
            Plugin::Provider(p) => self.provider(p),
            Plugin::Context(c) => self.context(c),
        }
    }

    pub fn provider(mut self, factory: Arc<dyn ProviderFactory>) -> Self {
        self.providers.push(factory);
        self
    }

    pub fn context(mut self, factory: Arc<dyn ContextFactory>) -> Self {
        self.contexts.push(factory);
        self
    }

    pub fn build(self) -> PluginRegistry {
        PluginRegistry {
            providers: self.providers,
            contexts: self.contexts,
        }
    }
}
