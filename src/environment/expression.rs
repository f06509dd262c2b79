//! Property expression expansion.
//!
//! Supported syntax (lenient):
//! - `${key}` and `${key1,key2}`: first key that resolves wins
//! - `${key:default}`: default is itself expanded
//! - `${env.NAME}`: process environment variable `NAME`
//! - `$$`: a literal `$`
//!
//! An unterminated `${` is copied through unchanged.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised while expanding an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    #[error("unresolved reference `{key}` in expression `{expression}`")]
    Unresolved { key: String, expression: String },
}

/// Substitutes embedded references in raw property strings.
pub trait ExpressionExpander: Send + Sync {
    fn expand(&self, raw: &str) -> Result<String, ExpandError>;
}

/// Default expander backed by a property table and the process environment.
#[derive(Debug, Clone, Default)]
pub struct PropertyExpander {
    properties: BTreeMap<String, String>,
    strict: bool,
}

impl PropertyExpander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Properties consulted before the process environment.
    pub fn with_properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Fail on references that resolve to nothing and carry no default.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn lookup(&self, key: &str) -> Option<String> {
        if let Some(value) = self.properties.get(key) {
            return Some(value.clone());
        }
        key.strip_prefix("env.")
            .and_then(|name| std::env::var(name).ok())
    }

    fn resolve(&self, body: &str, expression: &str) -> Result<String, ExpandError> {
        let (keys, default) = match body.find(':') {
            Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
            None => (body, None),
        };

        for key in keys.split(',').map(str::trim) {
            if let Some(value) = self.lookup(key) {
                return Ok(value);
            }
        }

        match default {
            Some(default) => self.expand(default),
            None if self.strict => Err(ExpandError::Unresolved {
                key: keys.to_string(),
                expression: expression.to_string(),
            }),
            None => Ok(String::new()),
        }
    }
}

impl ExpressionExpander for PropertyExpander {
    fn expand(&self, raw: &str) -> Result<String, ExpandError> {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(stripped) = after.strip_prefix('$') {
                out.push('$');
                rest = stripped;
                continue;
            }

            if let Some(body) = after.strip_prefix('{') {
                match closing_brace(body) {
                    Some(end) => {
                        out.push_str(&self.resolve(&body[..end], raw)?);
                        rest = &body[end + 1..];
                    }
                    None => {
                        out.push_str(&rest[pos..]);
                        rest = "";
                    }
                }
                continue;
            }

            out.push('$');
            rest = after;
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// Byte offset of the `}` closing an expression body, honouring nested `${...}`.
fn closing_brace(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                depth += 1;
                i += 2;
                continue;
            }
            b'}' if depth == 0 => return Some(i),
            b'}' => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expander() -> PropertyExpander {
        PropertyExpander::new()
            .with_property("host", "10.0.0.1")
            .with_property("port", "8080")
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(expander().expand("remote+http://h:1").unwrap(), "remote+http://h:1");
    }

    #[test]
    fn test_references_and_defaults() {
        let e = expander();
        assert_eq!(e.expand("${host}:${port}").unwrap(), "10.0.0.1:8080");
        assert_eq!(e.expand("${missing:fallback}").unwrap(), "fallback");
        assert_eq!(e.expand("${missing,host}").unwrap(), "10.0.0.1");
        assert_eq!(e.expand("${missing:${host}}").unwrap(), "10.0.0.1");
    }

    #[test]
    fn test_escape_and_lenient_syntax() {
        let e = expander();
        assert_eq!(e.expand("$$5").unwrap(), "$5");
        assert_eq!(e.expand("cost $5").unwrap(), "cost $5");
        assert_eq!(e.expand("${host").unwrap(), "${host");
        assert_eq!(e.expand("${missing}").unwrap(), "");
    }

    #[test]
    fn test_strict_mode_fails_on_unresolved() {
        let e = expander().strict(true);
        let err = e.expand("x-${nope}").unwrap_err();
        assert_eq!(
            err,
            ExpandError::Unresolved {
                key: "nope".into(),
                expression: "x-${nope}".into()
            }
        );
        assert_eq!(e.expand("${nope:ok}").unwrap(), "ok");
    }

    #[test]
    fn test_process_environment() {
        let path = std::env::var("PATH").unwrap_or_default();
        assert_eq!(expander().expand("${env.PATH}").unwrap(), path);
    }
}
