//! Shared mock plugins for integration tests.
#![allow(dead_code)]

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use naming_router::context::{Binding, Context, NameClassPair, Object, Resolved};
use naming_router::environment::Environment;
use naming_router::name::Name;
use naming_router::plugin::{ContextFactory, NamingProvider, ProviderFactory, ProviderHandle};
use naming_router::provider::ProviderUri;
use naming_router::NamingResult;

/// One forwarded operation: verb plus the names it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: &'static str,
    pub names: Vec<String>,
}

/// A context that records every operation it receives.
#[derive(Default)]
pub struct RecordingContext {
    pub label: String,
    calls: Mutex<Vec<Call>>,
}

impl RecordingContext {
    pub fn new(label: &str) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Call> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn record(&self, op: &'static str, names: &[&Name]) {
        self.calls.lock().unwrap().push(Call {
            op,
            names: names.iter().map(|n| n.to_string()).collect(),
        });
    }
}

impl Context for RecordingContext {
    fn lookup(&self, name: &Name) -> NamingResult<Resolved> {
        self.record("lookup", &[name]);
        Ok(Resolved::object(self.label.clone()))
    }

    fn bind(&self, name: &Name, _object: Object) -> NamingResult<()> {
        self.record("bind", &[name]);
        Ok(())
    }

    fn rebind(&self, name: &Name, _object: Object) -> NamingResult<()> {
        self.record("rebind", &[name]);
        Ok(())
    }

    fn unbind(&self, name: &Name) -> NamingResult<()> {
        self.record("unbind", &[name]);
        Ok(())
    }

    fn rename(&self, old_name: &Name, new_name: &Name) -> NamingResult<()> {
        self.record("rename", &[old_name, new_name]);
        Ok(())
    }

    fn list(&self, name: &Name) -> NamingResult<Vec<NameClassPair>> {
        self.record("list", &[name]);
        Ok(vec![NameClassPair {
            name: self.label.clone(),
            class_name: "String".into(),
        }])
    }

    fn list_bindings(&self, name: &Name) -> NamingResult<Vec<Binding>> {
        self.record("list_bindings", &[name]);
        Ok(Vec::new())
    }

    fn create_subcontext(&self, name: &Name) -> NamingResult<Arc<dyn Context>> {
        self.record("create_subcontext", &[name]);
        Ok(RecordingContext::new(&format!("{}/{}", self.label, name)))
    }

    fn destroy_subcontext(&self, name: &Name) -> NamingResult<()> {
        self.record("destroy_subcontext", &[name]);
        Ok(())
    }

    fn lookup_link(&self, name: &Name) -> NamingResult<Resolved> {
        self.record("lookup_link", &[name]);
        Ok(Resolved::object(self.label.clone()))
    }
}

/// Provider created by [`MockProviderFactory`].
pub struct MockProvider {
    pub factory: String,
    uris: Vec<ProviderUri>,
}

impl NamingProvider for MockProvider {
    fn uris(&self) -> &[ProviderUri] {
        &self.uris
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Provider plugin accepting a fixed set of URI schemes.
pub struct MockProviderFactory {
    pub name: String,
    schemes: Vec<Option<String>>,
    created: AtomicUsize,
}

impl MockProviderFactory {
    pub fn new(name: &str, schemes: &[Option<&str>]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            schemes: schemes.iter().map(|s| s.map(str::to_string)).collect(),
            created: AtomicUsize::new(0),
        })
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl ProviderFactory for MockProviderFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports_scheme(&self, uri_scheme: Option<&str>, _env: &Environment) -> bool {
        self.schemes.iter().any(|s| s.as_deref() == uri_scheme)
    }

    fn create_provider(&self, _env: &Environment, uris: &[ProviderUri]) -> NamingResult<ProviderHandle> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockProvider {
            factory: self.name.clone(),
            uris: uris.to_vec(),
        }))
    }
}

/// Context plugin serving fixed name schemes, with or without a given provider.
pub struct MockContextFactory {
    pub name: String,
    /// `Some(factory)`: only providers made by that factory; `None`: only without a provider.
    provider: Option<String>,
    schemes: Vec<Option<String>>,
    pub context: Arc<RecordingContext>,
}

impl MockContextFactory {
    pub fn new(name: &str, provider: Option<&str>, schemes: &[Option<&str>]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            provider: provider.map(str::to_string),
            schemes: schemes.iter().map(|s| s.map(str::to_string)).collect(),
            context: RecordingContext::new(name),
        })
    }
}

impl ContextFactory for MockContextFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports_scheme(&self, provider: Option<&ProviderHandle>, name_scheme: Option<&str>) -> bool {
        let provider_matches = match (&self.provider, provider) {
            (None, None) => true,
            (Some(expected), Some(handle)) => handle
                .as_any()
                .downcast_ref::<MockProvider>()
                .is_some_and(|p| &p.factory == expected),
            _ => false,
        };
        provider_matches && self.schemes.iter().any(|s| s.as_deref() == name_scheme)
    }

    fn create_root_context(
        &self,
        _provider: Option<&ProviderHandle>,
        _name_scheme: Option<&str>,
        _env: &Environment,
    ) -> NamingResult<Arc<dyn Context>> {
        Ok(self.context.clone())
    }
}

/// The label of a looked-up mock object.
pub fn label(resolved: &Resolved) -> String {
    resolved
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default()
}
