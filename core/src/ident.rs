//! Identifier shape validation.

use regex_lite::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors in the local shape of an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("Identifier must not be empty")]
    Empty,

    #[error("Invalid identifier '{0}': expected a letter or '_' followed by letters, digits or '_'")]
    Malformed(String),
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is a valid regex")
    })
}

/// Validate the shape of a model identifier.
pub fn validate_identifier(id: &str) -> Result<(), IdentifierError> {
    if id.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if !identifier_pattern().is_match(id) {
        return Err(IdentifierError::Malformed(id.to_string()));
    }
    Ok(())
}

/// Result type for identifier validation.
pub type IdentifierResult<T> = Result<T, IdentifierError>;
