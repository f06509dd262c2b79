//! Shared environment properties.
//!
//! # Data Flow
//! ```text
//! application / config file
//!     → Environment (shared handle, Arc<RwLock<Properties>>)
//!     → routing context, dispatcher, plugins (same handle, same map)
//!
//! lookup("") on a routing context:
//!     → Environment::fork() (new map, same value references)
//!     → child routing context mutates independently
//! ```
//!
//! # Design Decisions
//! - Cloning an `Environment` aliases the map; `fork()` is the only copy
//! - Reads and writes go through a read-write lock
//! - Values are opaque; only textual values take part in endpoint resolution

pub mod expression;

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A single property value.
#[derive(Clone)]
pub enum PropertyValue {
    Text(String),
    Flag(bool),
    Number(i64),
    /// Arbitrary application object (credentials, callbacks, ...).
    Object(Arc<dyn Any + Send + Sync>),
}

impl PropertyValue {
    /// Textual form, if the value has one.
    pub fn as_text(&self) -> Option<String> {
        match self {
            PropertyValue::Text(s) => Some(s.clone()),
            PropertyValue::Flag(b) => Some(b.to_string()),
            PropertyValue::Number(n) => Some(n.to_string()),
            PropertyValue::Object(_) => None,
        }
    }

    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        PropertyValue::Object(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            PropertyValue::Object(obj) => obj.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            PropertyValue::Flag(b) => f.debug_tuple("Flag").field(b).finish(),
            PropertyValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            PropertyValue::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyValue::Text(a), PropertyValue::Text(b)) => a == b,
            (PropertyValue::Flag(a), PropertyValue::Flag(b)) => a == b,
            (PropertyValue::Number(a), PropertyValue::Number(b)) => a == b,
            (PropertyValue::Object(a), PropertyValue::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Flag(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Number(n)
    }
}

/// A point-in-time copy of the environment.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Shared, internally locked property map.
#[derive(Clone, Default)]
pub struct Environment {
    inner: Arc<RwLock<Properties>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Independent copy: a new map holding the same value references.
    pub fn fork(&self) -> Self {
        Self::from(self.snapshot())
    }

    /// True when both handles refer to the same map.
    pub fn shares_map_with(&self, other: &Environment) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn get(&self, key: &str) -> Option<PropertyValue> {
        self.read().get(key).cloned()
    }

    /// Textual value of `key`; absent for missing keys and opaque objects.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.read().get(key).and_then(PropertyValue::as_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Insert a property, returning the previous value.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.write().insert(key.into(), value.into())
    }

    /// Remove a property, returning the previous value.
    pub fn remove(&self, key: &str) -> Option<PropertyValue> {
        self.write().remove(key)
    }

    pub fn snapshot(&self) -> Properties {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Properties> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Properties> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Properties> for Environment {
    fn from(properties: Properties) -> Self {
        Self {
            inner: Arc::new(RwLock::new(properties)),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let properties: Properties = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from(properties)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.read().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove_return_previous() {
        let env = Environment::new();
        assert_eq!(env.insert("k", "v1"), None);
        assert_eq!(env.insert("k", "v2"), Some(PropertyValue::from("v1")));
        assert_eq!(env.remove("k"), Some(PropertyValue::from("v2")));
        assert_eq!(env.remove("k"), None);
    }

    #[test]
    fn test_clone_aliases_fork_copies() {
        let env: Environment = [("a", "1")].into_iter().collect();
        let alias = env.clone();
        let forked = env.fork();

        alias.insert("b", "2");
        assert!(env.contains_key("b"));
        assert!(!forked.contains_key("b"));
        assert!(env.shares_map_with(&alias));
        assert!(!env.shares_map_with(&forked));

        forked.remove("a");
        assert_eq!(env.get_text("a").as_deref(), Some("1"));
    }

    #[test]
    fn test_fork_keeps_object_identity() {
        let env = Environment::new();
        env.insert("obj", PropertyValue::object(42u32));
        let forked = env.fork();
        assert_eq!(env.get("obj"), forked.get("obj"));
        assert_eq!(forked.get("obj").and_then(|v| v.downcast_ref::<u32>().copied()), Some(42));
    }

    #[test]
    fn test_textual_reads() {
        let env = Environment::new();
        env.insert("flag", true);
        env.insert("port", 8080i64);
        env.insert("obj", PropertyValue::object("x"));
        assert_eq!(env.get_text("flag").as_deref(), Some("true"));
        assert_eq!(env.get_text("port").as_deref(), Some("8080"));
        assert_eq!(env.get_text("obj"), None);
        assert_eq!(env.get_text("missing"), None);
    }
}
