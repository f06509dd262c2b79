//! The empty local root context.
//!
//! Used when no provider is configured and nothing claims the name's scheme:
//! every name other than the empty one is unbound and the context is read-only.

use std::sync::Arc;

use crate::context::{Binding, Context, NameClassPair, Object, Resolved};
use crate::environment::Environment;
use crate::error::{NamingError, NamingResult};
use crate::name::Name;

#[derive(Debug, Clone, Default)]
pub struct EmptyContext {
    environment: Environment,
}

impl EmptyContext {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    fn not_found(name: &Name) -> NamingError {
        NamingError::NameNotFound(name.to_string())
    }

    fn read_only(operation: &str) -> NamingError {
        NamingError::NotSupported(format!("{} on the empty local context", operation))
    }
}

impl Context for EmptyContext {
    fn lookup(&self, name: &Name) -> NamingResult<Resolved> {
        if name.is_empty() {
            Ok(Resolved::Context(Arc::new(self.clone())))
        } else {
            Err(Self::not_found(name))
        }
    }

    fn bind(&self, _name: &Name, _object: Object) -> NamingResult<()> {
        Err(Self::read_only("bind"))
    }

    fn rebind(&self, _name: &Name, _object: Object) -> NamingResult<()> {
        Err(Self::read_only("rebind"))
    }

    fn unbind(&self, _name: &Name) -> NamingResult<()> {
        Err(Self::read_only("unbind"))
    }

    fn rename(&self, _old_name: &Name, _new_name: &Name) -> NamingResult<()> {
        Err(Self::read_only("rename"))
    }

    fn list(&self, name: &Name) -> NamingResult<Vec<NameClassPair>> {
        if name.is_empty() {
            Ok(Vec::new())
        } else {
            Err(Self::not_found(name))
        }
    }

    fn list_bindings(&self, name: &Name) -> NamingResult<Vec<Binding>> {
        if name.is_empty() {
            Ok(Vec::new())
        } else {
            Err(Self::not_found(name))
        }
    }

    fn create_subcontext(&self, _name: &Name) -> NamingResult<Arc<dyn Context>> {
        Err(Self::read_only("createSubcontext"))
    }

    fn destroy_subcontext(&self, _name: &Name) -> NamingResult<()> {
        Err(Self::read_only("destroySubcontext"))
    }

    fn lookup_link(&self, name: &Name) -> NamingResult<Resolved> {
        self.lookup(name)
    }
}
