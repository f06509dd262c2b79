//! Legacy scheme-keyed URL contexts.
//!
//! Contexts obtained here receive the full, unsplit name and do their own
//! parsing of the scheme prefix.

use std::sync::Arc;

use dashmap::DashMap;

use crate::context::Context;
use crate::environment::Environment;
use crate::error::NamingResult;

/// Looks up a legacy URL context for a scheme.
pub trait UrlContextResolver: Send + Sync {
    fn resolve(&self, scheme: &str, env: &Environment) -> NamingResult<Option<Arc<dyn Context>>>;
}

/// Creates the URL context for one scheme.
pub trait UrlContextFactory: Send + Sync {
    fn create_url_context(&self, env: &Environment) -> NamingResult<Arc<dyn Context>>;
}

impl<F> UrlContextFactory for F
where
    F: Fn(&Environment) -> NamingResult<Arc<dyn Context>> + Send + Sync,
{
    fn create_url_context(&self, env: &Environment) -> NamingResult<Arc<dyn Context>> {
        self(env)
    }
}

/// Concurrent scheme → factory table; empty by default.
#[derive(Clone, Default)]
pub struct UrlContextRegistry {
    factories: Arc<DashMap<String, Arc<dyn UrlContextFactory>>>,
}

impl UrlContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one for the scheme.
    pub fn register(&self, scheme: impl Into<String>, factory: Arc<dyn UrlContextFactory>) {
        let scheme = scheme.into();
        tracing::debug!(scheme = %scheme, "Registered URL context factory");
        self.factories.insert(scheme, factory);
    }

    pub fn unregister(&self, scheme: &str) -> bool {
        self.factories.remove(scheme).is_some()
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.factories.contains_key(scheme)
    }
}

impl UrlContextResolver for UrlContextRegistry {
    fn resolve(&self, scheme: &str, env: &Environment) -> NamingResult<Option<Arc<dyn Context>>> {
        // Clone out of the map so the factory runs without holding a shard lock.
        let factory = self.factories.get(scheme).map(|entry| Arc::clone(entry.value()));
        match factory {
            Some(factory) => factory.create_url_context(env).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for UrlContextRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schemes: Vec<String> = self.factories.iter().map(|e| e.key().clone()).collect();
        f.debug_struct("UrlContextRegistry").field("schemes", &schemes).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EmptyContext;

    #[test]
    fn test_register_and_resolve() {
        let registry = UrlContextRegistry::new();
        let env = Environment::new();
        assert!(registry.resolve("java", &env).unwrap().is_none());

        registry.register(
            "java",
            Arc::new(|env: &Environment| -> NamingResult<Arc<dyn Context>> {
                Ok(Arc::new(EmptyContext::new(env.clone())))
            }),
        );
        assert!(registry.contains("java"));
        assert!(registry.resolve("java", &env).unwrap().is_some());
        assert!(registry.resolve("ejb", &env).unwrap().is_none());

        assert!(registry.unregister("java"));
        assert!(registry.resolve("java", &env).unwrap().is_none());
    }
}
