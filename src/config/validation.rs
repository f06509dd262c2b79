//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Default protocols must be usable as URI schemes
//! - Environment keys and expansion keys must be non-empty
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::config::schema::RouterConfig;
use crate::provider::uri::is_valid_scheme;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let protocols = [
        ("resolution.default_protocol", &config.resolution.default_protocol),
        ("resolution.default_secure_protocol", &config.resolution.default_secure_protocol),
    ];
    for (field, protocol) in protocols {
        if !is_valid_scheme(protocol) {
            errors.push(ValidationError::new(
                field,
                format!("`{}` is not a valid URI scheme", protocol),
            ));
        }
    }

    if config.environment.keys().any(|k| k.trim().is_empty()) {
        errors.push(ValidationError::new("environment", "property names must not be empty"));
    }
    if config.expansion.properties.keys().any(|k| k.trim().is_empty()) {
        errors.push(ValidationError::new(
            "expansion.properties",
            "property names must not be empty",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ConfigValue;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.resolution.default_protocol = "remote http".into();
        config.resolution.default_secure_protocol = String::new();
        config.environment.insert(" ".into(), ConfigValue::Text("x".into()));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].field, "resolution.default_protocol");
    }
}
