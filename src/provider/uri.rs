//! Provider endpoint URIs.
//!
//! # Responsibilities
//! - Parse one configured endpoint (`remote+http://host:8080`, `//host:1`, ...)
//! - Expose the scheme used for provider-plugin matching
//! - Build endpoints for legacy host/port connection properties
//!
//! # Design Decisions
//! - Absolute URIs are validated by the `url` crate
//! - Scheme-less references are accepted; they carry no scheme for matching
//! - A `//authority` reference still exposes host and port

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Why a string is not a usable URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("expected scheme name before ':'")]
    MissingScheme,

    #[error("illegal character in scheme name `{0}`")]
    InvalidScheme(String),

    #[error("illegal character {ch:?} at index {index}")]
    IllegalCharacter { ch: char, index: usize },

    #[error("{0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Form {
    /// `scheme:...`
    Absolute(Url),
    /// `//authority/...` without a scheme
    NetworkPath(Url),
    /// Any other scheme-less reference (possibly empty)
    Relative,
}

/// A candidate provider endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderUri {
    raw: String,
    form: Form,
}

impl ProviderUri {
    pub fn parse(input: &str) -> Result<Self, UriError> {
        let delimiter = input.find([':', '/', '?', '#']);
        if let Some(idx) = delimiter.filter(|&idx| input[idx..].starts_with(':')) {
            let scheme = &input[..idx];
            if scheme.is_empty() {
                return Err(UriError::MissingScheme);
            }
            if !is_valid_scheme(scheme) {
                return Err(UriError::InvalidScheme(scheme.to_string()));
            }
            let url = Url::parse(input).map_err(|e| UriError::Malformed(e.to_string()))?;
            return Ok(Self {
                raw: input.to_string(),
                form: Form::Absolute(url),
            });
        }

        check_reference_chars(input)?;

        let form = if input.starts_with("//") {
            // Borrow the parser's authority handling with a placeholder scheme.
            let url = Url::parse(&format!("reference:{}", input))
                .map_err(|e| UriError::Malformed(e.to_string()))?;
            Form::NetworkPath(url)
        } else {
            Form::Relative
        };

        Ok(Self {
            raw: input.to_string(),
            form,
        })
    }

    /// Compose `protocol://host:port`. IPv6 hosts must already be bracketed.
    pub fn from_parts(protocol: &str, host: &str, port: u16) -> Result<Self, UriError> {
        Self::parse(&format!("{}://{}:{}", protocol, host, port))
    }

    /// The URI scheme as written; `None` for scheme-less references.
    pub fn scheme(&self) -> Option<&str> {
        match &self.form {
            Form::Absolute(_) => self.raw.split_once(':').map(|(scheme, _)| scheme),
            Form::NetworkPath(_) | Form::Relative => None,
        }
    }

    pub fn host(&self) -> Option<&str> {
        match &self.form {
            Form::Absolute(url) | Form::NetworkPath(url) => url.host_str(),
            Form::Relative => None,
        }
    }

    pub fn port(&self) -> Option<u16> {
        match &self.form {
            Form::Absolute(url) | Form::NetworkPath(url) => url.port(),
            Form::Relative => None,
        }
    }

    /// Parsed form of an absolute URI.
    pub fn url(&self) -> Option<&Url> {
        match &self.form {
            Form::Absolute(url) => Some(url),
            _ => None,
        }
    }

    /// The text this URI was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for ProviderUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ProviderUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn check_reference_chars(input: &str) -> Result<(), UriError> {
    let bytes = input.as_bytes();
    for (index, ch) in input.char_indices() {
        let allowed = ch.is_ascii_alphanumeric()
            || "-._~:/?#[]@!$&'()*+,;=".contains(ch)
            || (ch == '%'
                && bytes.get(index + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(index + 2).is_some_and(u8::is_ascii_hexdigit));
        if !allowed {
            return Err(UriError::IllegalCharacter { ch, index });
        }
    }
    Ok(())
}
