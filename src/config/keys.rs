//! Environment property names consumed during endpoint resolution.
//!
//! The names match the ones understood by existing client configurations so
//! property files can be reused unchanged.

/// Comma-separated list of provider URIs.
pub const PROVIDER_URL: &str = "java.naming.provider.url";

/// Legacy comma-separated list of connection names; blanks around commas are ignored.
pub const REMOTE_CONNECTIONS: &str = "remote.connections";

/// Prefix of per-connection properties: `remote.connection.<name>.<key>`.
pub const REMOTE_CONNECTION_PREFIX: &str = "remote.connection.";

/// Prefix of the connection-provider defaults shared by every connection.
pub const REMOTE_CONNECTION_PROVIDER_PREFIX: &str = "remote.connectionprovider.create.options.";

pub const HOST_KEY: &str = "host";
pub const PORT_KEY: &str = "port";
pub const PROTOCOL_KEY: &str = "protocol";

/// Prefix of per-connection connect options.
pub const CONNECT_OPTIONS: &str = "connect.options.";

/// Option name of the TLS switch.
pub const SSL_ENABLED: &str = "org.xnio.Options.SSL_ENABLED";

pub const DEFAULT_PROTOCOL: &str = "remote+http";
pub const DEFAULT_SECURE_PROTOCOL: &str = "remote+https";

/// `remote.connection.<name>.<key>`
pub fn connection_key(connection: &str, key: &str) -> String {
    format!("{}{}.{}", REMOTE_CONNECTION_PREFIX, connection, key)
}

/// Per-connection TLS switch.
pub fn connection_ssl_key(connection: &str) -> String {
    connection_key(connection, &format!("{}{}", CONNECT_OPTIONS, SSL_ENABLED))
}

/// Global TLS default.
pub fn provider_ssl_key() -> String {
    format!("{}{}", REMOTE_CONNECTION_PROVIDER_PREFIX, SSL_ENABLED)
}
