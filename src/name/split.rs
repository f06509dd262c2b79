//! Splitting a name into its URL scheme and residual name.
//!
//! Only the first component is examined: everything before its first `:` is the
//! scheme, the rest of that component stays in front of the residual name.

use super::Name;

/// A name separated into an optional URL scheme and the remaining components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitName {
    url_scheme: Option<String>,
    residual: Name,
}

impl SplitName {
    pub fn url_scheme(&self) -> Option<&str> {
        self.url_scheme.as_deref()
    }

    pub fn residual(&self) -> &Name {
        &self.residual
    }

    /// True when there is neither a scheme nor any residual component.
    pub fn is_empty(&self) -> bool {
        self.url_scheme.is_none() && self.residual.is_empty()
    }

    pub fn into_parts(self) -> (Option<String>, Name) {
        (self.url_scheme, self.residual)
    }
}

/// Split `name` into a URL scheme and residual name. The input is never modified.
pub fn split(name: &Name) -> SplitName {
    let mut residual = name.clone();
    let Some(first) = name.get(0) else {
        return SplitName {
            url_scheme: None,
            residual,
        };
    };
    let Some(idx) = first.find(':') else {
        return SplitName {
            url_scheme: None,
            residual,
        };
    };

    let scheme = &first[..idx];
    let tail = &first[idx + 1..];

    residual.remove(0);
    // Keep an empty leading component only when a non-empty one follows it.
    let next_is_meaningful = name.get(1).is_some_and(|second| !second.is_empty());
    if !tail.is_empty() || next_is_meaningful {
        residual.insert(0, tail);
    }

    SplitName {
        url_scheme: (!scheme.is_empty()).then(|| scheme.to_string()),
        residual,
    }
}
