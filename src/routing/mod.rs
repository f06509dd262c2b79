//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Directory operation (name)
//!     → AsName (parse string names)
//!     → name::split (URL scheme + residual name)
//!     → empty name on lookup? → new RoutingContext over a forked environment
//!     → provider::ProviderUriResolver (candidate endpoints)
//!     → dispatch::Dispatcher (target context + legacy_name_form)
//!     → forward operation with original or residual name
//! ```
//!
//! # Design Decisions
//! - No retries and no fallback beyond the dispatcher tiers
//! - Plugin discovery happens once; forked scopes share the registry
//! - Name composition never consults providers

pub mod context;

pub use context::{AsName, RoutingContext, RoutingContextBuilder};
