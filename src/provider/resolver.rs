//! Provider endpoint resolution from the environment.
//!
//! # Responsibilities
//! - Read the direct provider list (`java.naming.provider.url`)
//! - Otherwise synthesize endpoints from legacy per-connection properties
//! - Distinguish "nothing configured" (`None`) from "configured" (`Some(list)`)
//!
//! # Design Decisions
//! - The direct list wins whenever it expands to a non-empty string
//! - One malformed entry fails the whole call; no partial lists
//! - Connections missing a host or a port are skipped silently

use std::sync::Arc;

use crate::config::keys;
use crate::config::schema::ResolutionConfig;
use crate::environment::expression::{ExpressionExpander, PropertyExpander};
use crate::environment::Environment;
use crate::error::{NamingError, NamingResult};
use crate::observability::metrics;
use crate::provider::uri::ProviderUri;

/// Derives candidate provider endpoints from an environment.
#[derive(Clone)]
pub struct ProviderUriResolver {
    expander: Arc<dyn ExpressionExpander>,
    default_protocol: String,
    default_secure_protocol: String,
}

impl ProviderUriResolver {
    pub fn new(expander: Arc<dyn ExpressionExpander>) -> Self {
        Self {
            expander,
            default_protocol: keys::DEFAULT_PROTOCOL.to_string(),
            default_secure_protocol: keys::DEFAULT_SECURE_PROTOCOL.to_string(),
        }
    }

    /// Resolver using the configured protocols and expansion table.
    pub fn from_config(config: &ResolutionConfig, expander: Arc<dyn ExpressionExpander>) -> Self {
        Self::new(expander).with_protocols(
            config.default_protocol.clone(),
            config.default_secure_protocol.clone(),
        )
    }

    /// Override the protocols used for legacy connections.
    pub fn with_protocols(mut self, plain: impl Into<String>, secure: impl Into<String>) -> Self {
        self.default_protocol = plain.into();
        self.default_secure_protocol = secure.into();
        self
    }

    /// Candidate endpoints, or `None` when neither property family is configured.
    pub fn resolve(&self, env: &Environment) -> NamingResult<Option<Vec<ProviderUri>>> {
        if let Some(raw) = env.get_text(keys::PROVIDER_URL) {
            let provider_url = self.expander.expand(&raw)?;
            if !provider_url.is_empty() {
                let uris = parse_provider_list(&provider_url)?;
                metrics::record_provider_uri_source("provider_url");
                return Ok(Some(uris));
            }
        }

        let connections = env.get_text(keys::REMOTE_CONNECTIONS).unwrap_or_default();
        let connections = connections.trim();
        if connections.is_empty() {
            return Ok(None);
        }

        tracing::warn!(
            property = keys::REMOTE_CONNECTIONS,
            "Endpoints derived from deprecated remote connection properties; configure {} instead",
            keys::PROVIDER_URL
        );
        metrics::record_provider_uri_source("legacy_connections");

        let mut uris = Vec::new();
        for connection in connections.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            if let Some(uri) = self.connection_uri(env, connection)? {
                uris.push(uri);
            }
        }
        Ok(Some(uris))
    }

    fn connection_uri(&self, env: &Environment, connection: &str) -> NamingResult<Option<ProviderUri>> {
        let host = env.get_text(&keys::connection_key(connection, keys::HOST_KEY));
        let port = env.get_text(&keys::connection_key(connection, keys::PORT_KEY));
        let ssl_enabled = env
            .get_text(&keys::connection_ssl_key(connection))
            .or_else(|| env.get_text(&keys::provider_ssl_key()));

        let protocol = env
            .get_text(&keys::connection_key(connection, keys::PROTOCOL_KEY))
            .unwrap_or_else(|| {
                if ssl_enabled.is_some_and(|v| v.eq_ignore_ascii_case("true")) {
                    self.default_secure_protocol.clone()
                } else {
                    self.default_protocol.clone()
                }
            });

        let (Some(host), Some(port)) = (host, port) else {
            tracing::debug!(connection, "Skipping connection without host and port");
            return Ok(None);
        };

        let mut host = self.expander.expand(&host)?;
        if host.contains(':') && !host.starts_with('[') && !host.ends_with(']') {
            host = format!("[{}]", host);
        }

        let raw = format!("{}://{}:{}", protocol, host, port);
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|e| NamingError::invalid_endpoint(raw.clone(), e))?;
        let uri = ProviderUri::from_parts(&protocol, &host, port)
            .map_err(|e| NamingError::invalid_endpoint(raw, e))?;

        tracing::debug!(connection, uri = %uri, "Synthesized provider URI");
        Ok(Some(uri))
    }
}

impl Default for ProviderUriResolver {
    fn default() -> Self {
        Self::new(Arc::new(PropertyExpander::new()))
    }
}

impl std::fmt::Debug for ProviderUriResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderUriResolver")
            .field("default_protocol", &self.default_protocol)
            .field("default_secure_protocol", &self.default_secure_protocol)
            .finish_non_exhaustive()
    }
}

/// Split a direct provider list on `,`. Trailing empty entries are dropped.
fn parse_provider_list(list: &str) -> NamingResult<Vec<ProviderUri>> {
    let mut tokens: Vec<&str> = list.split(',').collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }

    tokens
        .into_iter()
        .map(|token| {
            let token = token.trim();
            ProviderUri::parse(token).map_err(|e| NamingError::invalid_endpoint(token, e))
        })
        .collect()
}
