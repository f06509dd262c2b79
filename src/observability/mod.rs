//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! provider resolution, plugin discovery, dispatch
//!     → tracing events (structured fields: scheme, tier, uri)
//!     → metrics.rs (counters per tier / endpoint source)
//!
//! Binary start-up:
//!     → logging.rs installs the subscriber (EnvFilter + fmt)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing subscribers/recorders is the application's job
//! - Metrics go through the `metrics` facade and are no-ops without a recorder

pub mod logging;
pub mod metrics;
