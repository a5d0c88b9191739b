//! Compiler error types.

use kinetic_core::{ErrorKind, Violations};
use kinetic_units::UnitError;
use thiserror::Error;

/// Errors that can occur during assembly.
#[derive(Debug, Clone, Error)]
pub enum CompileError {
    /// Every whole-model error found during assembly.
    #[error("Model assembly failed:\n{0}")]
    Rejected(Violations),
}

impl CompileError {
    pub fn violations(&self) -> &Violations {
        match self {
            CompileError::Rejected(v) => v,
        }
    }

    pub fn into_violations(self) -> Violations {
        match self {
            CompileError::Rejected(v) => v,
        }
    }
}

/// Result type for assembly.
pub type CompileResult<T> = Result<T, CompileError>;

/// Diagnostic kind for a failed unit reference.
pub(crate) fn unit_error_kind(err: &UnitError) -> ErrorKind {
    match err {
        UnitError::UndefinedBaseUnit { .. } => ErrorKind::UndefinedBaseUnit,
        UnitError::IncompatibleUnits { .. } => ErrorKind::IncompatibleUnits,
        UnitError::Parse { .. } => ErrorKind::InvalidExpression,
        UnitError::DuplicateUnit { .. } => ErrorKind::DuplicateIdentifier,
    }
}
