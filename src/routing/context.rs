//! The root routing context.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::config::schema::RouterConfig;
use crate::context::{Binding, Context, NameClassPair, Object, Resolved};
use crate::dispatch::{Dispatcher, Resolution};
use crate::environment::expression::{ExpressionExpander, PropertyExpander};
use crate::environment::{Environment, PropertyValue};
use crate::error::NamingResult;
use crate::name::{split, Name, SplitName};
use crate::plugin::{PluginRegistry, UrlContextRegistry, UrlContextResolver};
use crate::provider::resolver::ProviderUriResolver;
use crate::provider::uri::ProviderUri;

/// Anything usable as a name argument: string forms are parsed first.
pub trait AsName {
    fn to_name(&self) -> NamingResult<Cow<'_, Name>>;
}

impl AsName for str {
    fn to_name(&self) -> NamingResult<Cow<'_, Name>> {
        Name::parse(self).map(Cow::Owned)
    }
}

impl AsName for String {
    fn to_name(&self) -> NamingResult<Cow<'_, Name>> {
        self.as_str().to_name()
    }
}

impl AsName for Name {
    fn to_name(&self) -> NamingResult<Cow<'_, Name>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<T: AsName + ?Sized> AsName for &T {
    fn to_name(&self) -> NamingResult<Cow<'_, Name>> {
        (**self).to_name()
    }
}

/// Routes every directory operation to the context serving the name's scheme.
#[derive(Clone)]
pub struct RoutingContext {
    environment: Environment,
    dispatcher: Dispatcher,
    uri_resolver: ProviderUriResolver,
}

impl RoutingContext {
    /// Route with `registry` and no legacy URL contexts. The environment is shared, not copied.
    pub fn new(environment: Environment, registry: PluginRegistry) -> Self {
        Self::builder(environment).registry(registry).build()
    }

    pub fn builder(environment: Environment) -> RoutingContextBuilder {
        RoutingContextBuilder {
            environment,
            registry: Arc::new(PluginRegistry::empty()),
            url_contexts: None,
            expander: None,
            protocols: None,
            uri_resolver: None,
        }
    }

    /// Build from a loaded configuration file.
    pub fn from_config(config: &RouterConfig, registry: PluginRegistry) -> Self {
        let expander = PropertyExpander::new()
            .with_properties(config.expansion.properties.clone())
            .strict(config.resolution.strict_expansion);
        let uri_resolver = ProviderUriResolver::from_config(&config.resolution, Arc::new(expander));
        Self::builder(config.build_environment())
            .registry(registry)
            .uri_resolver(uri_resolver)
            .build()
    }

    /// The shared environment handle.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn registry(&self) -> &Arc<PluginRegistry> {
        self.dispatcher.registry()
    }

    /// Set a property, returning the previous value.
    pub fn add_to_environment(
        &self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.environment.insert(key, value)
    }

    /// Remove a property, returning the previous value.
    pub fn remove_from_environment(&self, key: &str) -> Option<PropertyValue> {
        self.environment.remove(key)
    }

    /// A new root scope over a copy of the environment, sharing the plugins.
    pub fn fork(&self) -> Self {
        Self {
            environment: self.environment.fork(),
            dispatcher: self.dispatcher.clone(),
            uri_resolver: self.uri_resolver.clone(),
        }
    }

    pub fn parse_name(&self, name: &str) -> NamingResult<Name> {
        Name::parse(name)
    }

    /// `prefix` followed by `name`; no provider is consulted.
    pub fn compose_name(&self, name: &Name, prefix: &Name) -> Name {
        let mut composed = prefix.clone();
        composed.add_all(name);
        composed
    }

    /// String form of [`RoutingContext::compose_name`].
    pub fn compose_name_str(&self, name: &str, prefix: &str) -> NamingResult<String> {
        let name = Name::parse(name)?;
        let prefix = Name::parse(prefix)?;
        Ok(self.compose_name(&name, &prefix).to_string())
    }

    /// Provider endpoints derived from the current environment.
    pub fn provider_uris(&self) -> NamingResult<Option<Vec<ProviderUri>>> {
        self.uri_resolver.resolve(&self.environment)
    }

    /// Resolve the context that would serve `name`, without running an operation.
    pub fn resolve<N: AsName>(&self, name: N) -> NamingResult<Resolution> {
        let name = name.to_name()?;
        self.resolve_split(&split(&name))
    }

    pub fn lookup<N: AsName>(&self, name: N) -> NamingResult<Resolved> {
        let name = name.to_name()?;
        let split = split(&name);
        if split.is_empty() {
            return Ok(Resolved::Context(Arc::new(self.fork())));
        }
        let resolution = self.resolve_split(&split)?;
        resolution.context.lookup(forwarded(&resolution, &name, &split))
    }

    pub fn bind<N: AsName>(&self, name: N, object: Object) -> NamingResult<()> {
        self.forward(name, |ctx, name| ctx.bind(name, object))
    }

    pub fn rebind<N: AsName>(&self, name: N, object: Object) -> NamingResult<()> {
        self.forward(name, |ctx, name| ctx.rebind(name, object))
    }

    pub fn unbind<N: AsName>(&self, name: N) -> NamingResult<()> {
        self.forward(name, |ctx, name| ctx.unbind(name))
    }

    /// Rename within the context chosen by `old_name`'s scheme.
    pub fn rename<O: AsName, N: AsName>(&self, old_name: O, new_name: N) -> NamingResult<()> {
        let old_name = old_name.to_name()?;
        let new_name = new_name.to_name()?;
        let old_split = split(&old_name);
        let new_split = split(&new_name);

        let resolution = self.resolve_split(&old_split)?;
        // The new name's form follows its own resolution outcome.
        let new_legacy_form = if new_split.url_scheme() == old_split.url_scheme() {
            resolution.legacy_name_form
        } else {
            self.resolve_split(&new_split)?.legacy_name_form
        };

        let old_target = forwarded(&resolution, &old_name, &old_split);
        let new_target = if new_legacy_form {
            new_name.as_ref()
        } else {
            new_split.residual()
        };
        resolution.context.rename(old_target, new_target)
    }

    pub fn list<N: AsName>(&self, name: N) -> NamingResult<Vec<NameClassPair>> {
        self.forward(name, |ctx, name| ctx.list(name))
    }

    pub fn list_bindings<N: AsName>(&self, name: N) -> NamingResult<Vec<Binding>> {
        self.forward(name, |ctx, name| ctx.list_bindings(name))
    }

    pub fn create_subcontext<N: AsName>(&self, name: N) -> NamingResult<Arc<dyn Context>> {
        self.forward(name, |ctx, name| ctx.create_subcontext(name))
    }

    pub fn destroy_subcontext<N: AsName>(&self, name: N) -> NamingResult<()> {
        self.forward(name, |ctx, name| ctx.destroy_subcontext(name))
    }

    pub fn lookup_link<N: AsName>(&self, name: N) -> NamingResult<Resolved> {
        self.forward(name, |ctx, name| ctx.lookup_link(name))
    }

    /// Always the root.
    pub fn name_in_namespace(&self) -> String {
        String::new()
    }

    pub fn close(&self) -> NamingResult<()> {
        Ok(())
    }

    fn forward<N, T, F>(&self, name: N, op: F) -> NamingResult<T>
    where
        N: AsName,
        F: FnOnce(&dyn Context, &Name) -> NamingResult<T>,
    {
        let name = name.to_name()?;
        let split = split(&name);
        let resolution = self.resolve_split(&split)?;
        op(resolution.context.as_ref(), forwarded(&resolution, &name, &split))
    }

    fn resolve_split(&self, split: &SplitName) -> NamingResult<Resolution> {
        let provider_uris = self.provider_uris()?;
        self.dispatcher
            .resolve(provider_uris.as_deref(), split.url_scheme(), &self.environment)
    }
}

/// The name handed to the target: unsplit for legacy URL contexts, residual otherwise.
fn forwarded<'a>(resolution: &Resolution, original: &'a Name, split: &'a SplitName) -> &'a Name {
    if resolution.legacy_name_form {
        original
    } else {
        split.residual()
    }
}

impl Context for RoutingContext {
    fn lookup(&self, name: &Name) -> NamingResult<Resolved> {
        RoutingContext::lookup(self, name)
    }

    fn bind(&self, name: &Name, object: Object) -> NamingResult<()> {
        RoutingContext::bind(self, name, object)
    }

    fn rebind(&self, name: &Name, object: Object) -> NamingResult<()> {
        RoutingContext::rebind(self, name, object)
    }

    fn unbind(&self, name: &Name) -> NamingResult<()> {
        RoutingContext::unbind(self, name)
    }

    fn rename(&self, old_name: &Name, new_name: &Name) -> NamingResult<()> {
        RoutingContext::rename(self, old_name, new_name)
    }

    fn list(&self, name: &Name) -> NamingResult<Vec<NameClassPair>> {
        RoutingContext::list(self, name)
    }

    fn list_bindings(&self, name: &Name) -> NamingResult<Vec<Binding>> {
        RoutingContext::list_bindings(self, name)
    }

    fn create_subcontext(&self, name: &Name) -> NamingResult<Arc<dyn Context>> {
        RoutingContext::create_subcontext(self, name)
    }

    fn destroy_subcontext(&self, name: &Name) -> NamingResult<()> {
        RoutingContext::destroy_subcontext(self, name)
    }

    fn lookup_link(&self, name: &Name) -> NamingResult<Resolved> {
        RoutingContext::lookup_link(self, name)
    }

    fn name_in_namespace(&self) -> NamingResult<String> {
        Ok(RoutingContext::name_in_namespace(self))
    }

    fn close(&self) -> NamingResult<()> {
        RoutingContext::close(self)
    }

    fn environment(&self) -> NamingResult<Environment> {
        Ok(self.environment.clone())
    }

    fn add_to_environment(&self, key: &str, value: PropertyValue) -> NamingResult<Option<PropertyValue>> {
        Ok(RoutingContext::add_to_environment(self, key, value))
    }

    fn remove_from_environment(&self, key: &str) -> NamingResult<Option<PropertyValue>> {
        Ok(RoutingContext::remove_from_environment(self, key))
    }
}

impl fmt::Debug for RoutingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingContext")
            .field("environment", &self.environment)
            .field("dispatcher", &self.dispatcher)
            .field("uri_resolver", &self.uri_resolver)
            .finish()
    }
}

/// Configures a [`RoutingContext`].
pub struct RoutingContextBuilder {
    environment: Environment,
    registry: Arc<PluginRegistry>,
    url_contexts: Option<Arc<dyn UrlContextResolver>>,
    expander: Option<Arc<dyn ExpressionExpander>>,
    protocols: Option<(String, String)>,
    uri_resolver: Option<ProviderUriResolver>,
}

impl RoutingContextBuilder {
    pub fn registry(mut self, registry: PluginRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Share an existing registry between several routing contexts.
    pub fn shared_registry(mut self, registry: Arc<PluginRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn url_contexts(mut self, resolver: Arc<dyn UrlContextResolver>) -> Self {
        self.url_contexts = Some(resolver);
        self
    }

    /// Expander for `${...}` references; ignored when `uri_resolver` is set.
    pub fn expander(mut self, expander: Arc<dyn ExpressionExpander>) -> Self {
        self.expander = Some(expander);
        self
    }

    /// Protocols for legacy connections; ignored when `uri_resolver` is set.
    pub fn protocols(mut self, plain: impl Into<String>, secure: impl Into<String>) -> Self {
        self.protocols = Some((plain.into(), secure.into()));
        self
    }

    pub fn uri_resolver(mut self, resolver: ProviderUriResolver) -> Self {
        self.uri_resolver = Some(resolver);
        self
    }

    pub fn build(self) -> RoutingContext {
        let url_contexts = self
            .url_contexts
            .unwrap_or_else(|| Arc::new(UrlContextRegistry::new()));
        let uri_resolver = match self.uri_resolver {
            Some(resolver) => resolver,
            None => {
                let resolver = match self.expander {
                    Some(expander) => ProviderUriResolver::new(expander),
                    None => ProviderUriResolver::default(),
                };
                match self.protocols {
                    Some((plain, secure)) => resolver.with_protocols(plain, secure),
                    None => resolver,
                }
            }
        };
        RoutingContext {
            environment: self.environment,
            dispatcher: Dispatcher::new(self.registry, url_contexts),
            uri_resolver,
        }
    }
}
