//! Plugin capability contracts.
//!
//! # Data Flow
//! ```text
//! bootstrap / discovery
//!     → Plugin::{Provider, Context} items (failures filtered out)
//!     → registry.rs (two ordered, read-only lists)
//!     → dispatch scans them in order; first capable plugin wins
//!
//! Legacy path:
//!     scheme → url_context.rs (UrlContextResolver) → Option<context>
//! ```
//!
//! # Design Decisions
//! - Two closed contracts: capability check + factory method
//! - Order is significant: lists are priority lists, never sets
//! - Providers are shared handles so context plugins can inspect them

pub mod registry;
pub mod url_context;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::environment::Environment;
use crate::error::NamingResult;
use crate::provider::uri::ProviderUri;

pub use registry::{PluginLoadError, PluginRegistry, PluginRegistryBuilder};
pub use url_context::{UrlContextFactory, UrlContextRegistry, UrlContextResolver};

/// A connection to one or more provider endpoints.
pub trait NamingProvider: Send + Sync {
    /// Endpoints this provider was created for.
    fn uris(&self) -> &[ProviderUri];

    /// Concrete type access for context plugins that only serve their own providers.
    fn as_any(&self) -> &dyn Any;
}

/// Shared provider handle.
pub type ProviderHandle = Arc<dyn NamingProvider>;

/// Creates providers for the provider URI schemes it understands.
pub trait ProviderFactory: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Whether URIs with this scheme can be served (`None` for scheme-less URIs).
    fn supports_scheme(&self, uri_scheme: Option<&str>, env: &Environment) -> bool;

    fn create_provider(&self, env: &Environment, uris: &[ProviderUri]) -> NamingResult<ProviderHandle>;
}

/// Creates root contexts for a (provider, name scheme) pair.
pub trait ContextFactory: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn supports_scheme(&self, provider: Option<&ProviderHandle>, name_scheme: Option<&str>) -> bool;

    fn create_root_context(
        &self,
        provider: Option<&ProviderHandle>,
        name_scheme: Option<&str>,
        env: &Environment,
    ) -> NamingResult<Arc<dyn Context>>;
}

/// One discovered plugin.
#[derive(Clone)]
pub enum Plugin {
    Provider(Arc<dyn ProviderFactory>),
    Context(Arc<dyn ContextFactory>),
}

impl Plugin {
    pub fn name(&self) -> &str {
        match self {
            Plugin::Provider(p) => p.name(),
            Plugin::Context(c) => c.name(),
        }
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plugin::Provider(p) => f.debug_tuple("Provider").field(&p.name()).finish(),
            Plugin::Context(c) => f.debug_tuple("Context").field(&c.name()).finish(),
        }
    }
}
