//! Provider and context selection for one resolved scheme.

use std::fmt;
use std::sync::Arc;

use crate::context::{Context, EmptyContext};
use crate::environment::Environment;
use crate::error::{NamingError, NamingResult};
use crate::observability::metrics;
use crate::plugin::{PluginRegistry, UrlContextResolver};
use crate::provider::uri::ProviderUri;

/// Which strategy produced a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Context plugin serving requests without a provider.
    NoProvider,
    /// Legacy scheme-keyed URL context.
    LegacyUrlContext,
    /// Empty local root context.
    LocalDefault,
    /// Provider plugin + context plugin.
    ProviderMatched,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::NoProvider => "no_provider",
            Tier::LegacyUrlContext => "legacy_url_context",
            Tier::LocalDefault => "local_default",
            Tier::ProviderMatched => "provider_matched",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The context an operation should be forwarded to.
#[derive(Clone)]
pub struct Resolution {
    pub context: Arc<dyn Context>,
    /// Forward the original, unsplit name instead of the residual name.
    pub legacy_name_form: bool,
    pub tier: Tier,
}

impl Resolution {
    fn new(context: Arc<dyn Context>, tier: Tier) -> Self {
        Self {
            context,
            legacy_name_form: tier == Tier::LegacyUrlContext,
            tier,
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("legacy_name_form", &self.legacy_name_form)
            .field("tier", &self.tier)
            .finish_non_exhaustive()
    }
}

/// Selects provider and context plugins for a request.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<PluginRegistry>,
    url_contexts: Arc<dyn UrlContextResolver>,
}

impl Dispatcher {
    pub fn new(registry: Arc<PluginRegistry>, url_contexts: Arc<dyn UrlContextResolver>) -> Self {
        Self {
            registry,
            url_contexts,
        }
    }

    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    pub fn url_contexts(&self) -> &Arc<dyn UrlContextResolver> {
        &self.url_contexts
    }

    /// Pick the context serving `scheme`, given the candidate provider URIs.
    pub fn resolve(
        &self,
        provider_uris: Option<&[ProviderUri]>,
        scheme: Option<&str>,
        env: &Environment,
    ) -> NamingResult<Resolution> {
        let result = self.select(provider_uris, scheme, env);
        match &result {
            Ok(resolution) => {
                tracing::debug!(
                    scheme = scheme.unwrap_or(""),
                    tier = %resolution.tier,
                    legacy_name_form = resolution.legacy_name_form,
                    "Resolved naming context"
                );
                metrics::record_resolution(resolution.tier.as_str());
            }
            Err(NamingError::NoProviderAvailable { .. }) => {
                tracing::debug!(scheme = scheme.unwrap_or(""), "No naming provider available");
                metrics::record_resolution_failure();
            }
            Err(_) => {}
        }
        result
    }

    fn select(
        &self,
        provider_uris: Option<&[ProviderUri]>,
        scheme: Option<&str>,
        env: &Environment,
    ) -> NamingResult<Resolution> {
        let with_schemes = provider_uris
            .filter(|uris| uris.iter().any(|uri| uri.scheme().is_some_and(|s| !s.is_empty())));

        match with_schemes {
            Some(uris) => self.select_with_provider(uris, scheme, env),
            None => self.select_without_provider(scheme, env),
        }
    }

    fn select_without_provider(&self, scheme: Option<&str>, env: &Environment) -> NamingResult<Resolution> {
        for factory in self.registry.contexts() {
            if factory.supports_scheme(None, scheme) {
                let context = factory.create_root_context(None, scheme, env)?;
                return Ok(Resolution::new(context, Tier::NoProvider));
            }
        }

        match scheme {
            Some(scheme) => self
                .legacy_url_context(scheme, env)?
                .ok_or_else(|| no_provider(Some(scheme))),
            None => Ok(Resolution::new(
                Arc::new(EmptyContext::new(env.clone())),
                Tier::LocalDefault,
            )),
        }
    }

    fn select_with_provider(
        &self,
        uris: &[ProviderUri],
        scheme: Option<&str>,
        env: &Environment,
    ) -> NamingResult<Resolution> {
        for provider_factory in self.registry.providers() {
            let covers_all = uris
                .iter()
                .all(|uri| provider_factory.supports_scheme(uri.scheme(), env));
            if !covers_all {
                continue;
            }

            let provider = provider_factory.create_provider(env, uris)?;
            for context_factory in self.registry.contexts() {
                if context_factory.supports_scheme(Some(&provider), scheme) {
                    let context = context_factory.create_root_context(Some(&provider), scheme, env)?;
                    return Ok(Resolution::new(context, Tier::ProviderMatched));
                }
            }
            tracing::debug!(
                provider = provider_factory.name(),
                scheme = scheme.unwrap_or(""),
                "Provider plugin matched but no context plugin supports it"
            );
        }

        if let Some(scheme) = scheme {
            if let Some(resolution) = self.legacy_url_context(scheme, env)? {
                return Ok(resolution);
            }
        }
        Err(no_provider(scheme))
    }

    fn legacy_url_context(&self, scheme: &str, env: &Environment) -> NamingResult<Option<Resolution>> {
        Ok(self
            .url_contexts
            .resolve(scheme, env)?
            .map(|context| Resolution::new(context, Tier::LegacyUrlContext)))
    }
}

fn no_provider(scheme: Option<&str>) -> NamingError {
    NamingError::NoProviderAvailable {
        scheme: scheme.map(str::to_string),
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::UrlContextRegistry;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(PluginRegistry::empty()), Arc::new(UrlContextRegistry::new()))
    }

    #[test]
    fn test_no_scheme_falls_back_to_local_context() {
        let resolution = dispatcher().resolve(None, None, &Environment::new()).unwrap();
        assert_eq!(resolution.tier, Tier::LocalDefault);
        assert!(!resolution.legacy_name_form);
    }

    #[test]
    fn test_unclaimed_scheme_fails() {
        let err = dispatcher().resolve(None, Some("ejb"), &Environment::new()).unwrap_err();
        assert!(matches!(err, NamingError::NoProviderAvailable { scheme: Some(s) } if s == "ejb"));
    }

    #[test]
    fn test_scheme_less_uris_use_no_provider_tier() {
        let uris = vec![ProviderUri::parse("//h:1").unwrap()];
        let resolution = dispatcher().resolve(Some(uris.as_slice()), None, &Environment::new()).unwrap();
        assert_eq!(resolution.tier, Tier::LocalDefault);

        let resolution = dispatcher().resolve(Some(&[][..]), None, &Environment::new()).unwrap();
        assert_eq!(resolution.tier, Tier::LocalDefault);
    }

    #[test]
    fn test_uncovered_provider_uris_fail() {
        let uris = vec![ProviderUri::parse("remote+http://h:1").unwrap()];
        let err = dispatcher().resolve(Some(uris.as_slice()), None, &Environment::new()).unwrap_err();
        assert!(matches!(err, NamingError::NoProviderAvailable { scheme: None }));
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(Tier::ProviderMatched.to_string(), "provider_matched");
        assert_eq!(Tier::LegacyUrlContext.as_str(), "legacy_url_context");
    }
}
