//! Registry errors.

use kinetic_core::{ErrorKind, IdentifierError, Namespace};
use thiserror::Error;

/// Errors raised while registering or looking up entities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("Duplicate {namespace} identifier: {id}")]
    DuplicateIdentifier { namespace: Namespace, id: String },

    #[error("Unknown {namespace} identifier: {id}")]
    UnknownIdentifier { namespace: Namespace, id: String },

    #[error("Invalid {namespace} '{id}': {message}")]
    Shape {
        namespace: Namespace,
        id: String,
        message: String,
    },
}

impl RegistryError {
    pub fn duplicate(namespace: Namespace, id: impl Into<String>) -> Self {
        RegistryError::DuplicateIdentifier {
            namespace,
            id: id.into(),
        }
    }

    pub fn unknown(namespace: Namespace, id: impl Into<String>) -> Self {
        RegistryError::UnknownIdentifier {
            namespace,
            id: id.into(),
        }
    }

    pub fn shape(namespace: Namespace, id: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::Shape {
            namespace,
            id: id.into(),
            message: message.into(),
        }
    }

    pub(crate) fn identifier(namespace: Namespace, id: &str, err: IdentifierError) -> Self {
        Self::shape(namespace, id, err.to_string())
    }

    /// Diagnostic kind, where one applies.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            RegistryError::DuplicateIdentifier { .. } => Some(ErrorKind::DuplicateIdentifier),
            RegistryError::UnknownIdentifier { .. } => Some(ErrorKind::UnknownIdentifier),
            RegistryError::Shape { .. } => None,
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
