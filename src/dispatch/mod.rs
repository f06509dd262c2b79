//! Capability dispatch.
//!
//! # Data Flow
//! ```text
//! (provider URIs?, name scheme?)
//!     → no usable provider URI:
//!         context plugin for (None, scheme) → legacy URL context → empty local context
//!     → provider URIs with schemes:
//!         provider plugin covering every URI → context plugin for (provider, scheme)
//!         → legacy URL context → NoProviderAvailable
//!     → Resolution { context, legacy_name_form, tier }
//! ```
//!
//! # Design Decisions
//! - Strict tier order, first capable plugin wins (plugin order is the only tie-break)
//! - Provider coverage is all-or-nothing over the URI list
//! - `legacy_name_form` tells the caller to pass the unsplit name

pub mod dispatcher;

pub use dispatcher::{Dispatcher, Resolution, Tier};
