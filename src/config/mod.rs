//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated)
//!     → initial Environment + ProviderUriResolver settings
//!
//! At resolution time:
//!     keys.rs names the environment properties read by provider/resolver.rs
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The environment stays mutable after load; the file only seeds it

pub mod keys;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ConfigValue, ExpansionConfig, ObservabilityConfig, ResolutionConfig, RouterConfig};
