//! Provider endpoint subsystem.
//!
//! # Data Flow
//! ```text
//! Environment
//!     → resolver.rs
//!         java.naming.provider.url  → split on ',' → uri.rs parse each
//!         remote.connections        → per-connection host/port/ssl/protocol
//!                                   → uri.rs compose protocol://host:port
//!     → Option<Vec<ProviderUri>>
//!     → dispatch (provider-plugin matching by URI scheme)
//! ```
//!
//! # Design Decisions
//! - `None` means "no provider selection", `Some(vec![])` means "configured but empty"
//! - Expansion of `${...}` references happens before parsing
//! - The legacy path logs a deprecation warning on every resolution that uses it

pub mod resolver;
pub mod uri;

pub use resolver::ProviderUriResolver;
pub use uri::{ProviderUri, UriError};
