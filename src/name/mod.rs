//! Composite names.
//!
//! # Data Flow
//! ```text
//! "ejb:app/module/bean"  (string form)
//!     → Name::parse (components separated by '/')
//!     → split.rs (leading URL scheme + residual name)
//!     → routing context picks a backend from the scheme
//! ```
//!
//! # Design Decisions
//! - Components are plain strings; only the first one is ever inspected for a scheme
//! - `\` escapes separators and quotes, a leading quote protects a whole component
//! - `Display` output parses back to an equal `Name`

pub mod split;

use std::fmt;
use std::str::FromStr;

use crate::error::{NamingError, NamingResult};

pub use split::{split, SplitName};

const SEPARATOR: char = '/';
const ESCAPE: char = '\\';

/// An ordered sequence of name components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    components: Vec<String>,
}

impl Name {
    /// The empty name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a string in composite-name syntax.
    pub fn parse(input: &str) -> NamingResult<Self> {
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut components: Vec<String> = Vec::new();
        let mut i = 0;

        while i < len {
            let (component, next) = parse_component(input, &chars, i)?;
            components.push(component);
            i = next;
            if i < len {
                // Skip the separator
                i += 1;
                if i == len && components.iter().any(|c| !c.is_empty()) {
                    components.push(String::new());
                }
            }
        }

        Ok(Self { components })
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.components.get(index).map(String::as_str)
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(String::as_str)
    }

    /// Append a component at the end.
    pub fn add(&mut self, component: impl Into<String>) -> &mut Self {
        self.components.push(component.into());
        self
    }

    /// Insert a component at `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, component: impl Into<String>) -> &mut Self {
        self.components.insert(index, component.into());
        self
    }

    /// Remove and return the component at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.components.len() {
            Some(self.components.remove(index))
        } else {
            None
        }
    }

    /// Append every component of `suffix`, e.g. `prefix.add_all(&name)`.
    pub fn add_all(&mut self, suffix: &Name) -> &mut Self {
        self.components.extend(suffix.components.iter().cloned());
        self
    }

    /// The first `count` components.
    pub fn prefix(&self, count: usize) -> Name {
        let end = count.min(self.components.len());
        Self {
            components: self.components[..end].to_vec(),
        }
    }

    /// Everything from component `start` on.
    pub fn suffix(&self, start: usize) -> Name {
        let start = start.min(self.components.len());
        Self {
            components: self.components[start..].to_vec(),
        }
    }

    pub fn starts_with(&self, other: &Name) -> bool {
        self.components.starts_with(&other.components)
    }
}

/// Parse one component starting at `start`; returns it and the index of the
/// separator (or end of input) that terminated it.
fn parse_component(input: &str, chars: &[char], start: usize) -> NamingResult<(String, usize)> {
    let len = chars.len();
    let mut out = String::new();
    let mut i = start;

    if i < len && is_quote(chars[i]) {
        let quote = chars[i];
        i += 1;
        loop {
            if i >= len {
                return Err(malformed(input, "unterminated quoted component"));
            }
            let c = chars[i];
            if c == ESCAPE && i + 1 < len && (chars[i + 1] == quote || chars[i + 1] == ESCAPE) {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            i += 1;
            if c == quote {
                break;
            }
            out.push(c);
        }
        if i < len && chars[i] != SEPARATOR {
            return Err(malformed(input, "characters after closing quote"));
        }
        return Ok((out, i));
    }

    while i < len && chars[i] != SEPARATOR {
        let c = chars[i];
        if c == ESCAPE {
            match chars.get(i + 1) {
                None => return Err(malformed(input, "unescaped trailing '\\'")),
                Some(&next) if next == SEPARATOR || next == ESCAPE || is_quote(next) => {
                    out.push(next);
                    i += 2;
                }
                Some(_) => {
                    out.push(c);
                    i += 1;
                }
            }
        } else {
            out.push(c);
            i += 1;
        }
    }
    Ok((out, i))
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn malformed(input: &str, reason: &str) -> NamingError {
    NamingError::MalformedName {
        name: input.to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for Name {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.components.is_empty() && self.components.iter().all(String::is_empty) {
            for _ in &self.components {
                f.write_str("/")?;
            }
            return Ok(());
        }
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            for (j, c) in component.chars().enumerate() {
                if c == SEPARATOR || c == ESCAPE || (j == 0 && is_quote(c)) {
                    write!(f, "{}", ESCAPE)?;
                }
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for Name {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Name {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
