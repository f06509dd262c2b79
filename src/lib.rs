//! Root naming context router.
//!
//! Splits composite names into a URL scheme and residual name, derives
//! provider endpoints from the environment and dispatches each directory
//! operation to the plugin-supplied context that serves it.

pub mod config;
pub mod context;
pub mod dispatch;
pub mod environment;
pub mod error;
pub mod name;
pub mod observability;
pub mod plugin;
pub mod provider;
pub mod routing;

pub use config::schema::RouterConfig;
pub use context::{Context, Resolved};
pub use environment::{Environment, PropertyValue};
pub use error::{NamingError, NamingResult};
pub use name::Name;
pub use plugin::PluginRegistry;
pub use routing::RoutingContext;
