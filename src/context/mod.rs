//! Directory context contract.
//!
//! # Data Flow
//! ```text
//! RoutingContext operation
//!     → dispatch picks an Arc<dyn Context>
//!     → Context verb (lookup, bind, list, ...) with residual or original name
//!     → backend-specific result
//! ```
//!
//! # Design Decisions
//! - Contexts are shared (`Arc`) and take `&self`; backends use interior mutability
//! - Bound objects are opaque `Any` values; sub-contexts are returned as `Resolved::Context`
//! - Listings are materialised as vectors
//! - Environment access is optional; only routing scopes expose theirs

pub mod empty;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::environment::{Environment, PropertyValue};
use crate::error::{NamingError, NamingResult};
use crate::name::Name;

pub use empty::EmptyContext;

/// An opaque bound object.
pub type Object = Arc<dyn Any + Send + Sync>;

/// Result of a lookup: a plain object or a nested context.
#[derive(Clone)]
pub enum Resolved {
    Object(Object),
    Context(Arc<dyn Context>),
}

impl Resolved {
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Resolved::Object(Arc::new(value))
    }

    pub fn as_context(&self) -> Option<&Arc<dyn Context>> {
        match self {
            Resolved::Context(ctx) => Some(ctx),
            Resolved::Object(_) => None,
        }
    }

    pub fn into_context(self) -> Option<Arc<dyn Context>> {
        match self {
            Resolved::Context(ctx) => Some(ctx),
            Resolved::Object(_) => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Resolved::Object(obj) => obj.downcast_ref::<T>(),
            Resolved::Context(_) => None,
        }
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Object(_) => f.write_str("Object(..)"),
            Resolved::Context(_) => f.write_str("Context(..)"),
        }
    }
}

/// Name and type of a listed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameClassPair {
    pub name: String,
    pub class_name: String,
}

/// A listed entry with its bound value.
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: String,
    pub class_name: String,
    pub object: Resolved,
}

/// Directory operations every backend context provides.
pub trait Context: Send + Sync {
    fn lookup(&self, name: &Name) -> NamingResult<Resolved>;

    fn bind(&self, name: &Name, object: Object) -> NamingResult<()>;

    fn rebind(&self, name: &Name, object: Object) -> NamingResult<()>;

    fn unbind(&self, name: &Name) -> NamingResult<()>;

    fn rename(&self, old_name: &Name, new_name: &Name) -> NamingResult<()>;

    fn list(&self, name: &Name) -> NamingResult<Vec<NameClassPair>>;

    fn list_bindings(&self, name: &Name) -> NamingResult<Vec<Binding>>;

    fn create_subcontext(&self, name: &Name) -> NamingResult<Arc<dyn Context>>;

    fn destroy_subcontext(&self, name: &Name) -> NamingResult<()>;

    /// Like `lookup`, but does not follow a link bound at the final component.
    fn lookup_link(&self, name: &Name) -> NamingResult<Resolved>;

    /// Full name of this context in its own namespace.
    fn name_in_namespace(&self) -> NamingResult<String> {
        Ok(String::new())
    }

    fn close(&self) -> NamingResult<()> {
        Ok(())
    }

    /// Handle to this context's environment.
    fn environment(&self) -> NamingResult<Environment> {
        Err(NamingError::NotSupported("environment".into()))
    }

    /// Set a property in this context's environment, returning the previous value.
    fn add_to_environment(&self, _key: &str, _value: PropertyValue) -> NamingResult<Option<PropertyValue>> {
        Err(NamingError::NotSupported("add_to_environment".into()))
    }

    fn remove_from_environment(&self, _key: &str) -> NamingResult<Option<PropertyValue>> {
        Err(NamingError::NotSupported("remove_from_environment".into()))
    }
}
