//! Constraint error types.

use kinetic_core::Violations;
use thiserror::Error;

/// Result type for constraint operations.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors that can occur during consistency checking.
#[derive(Debug, Clone, Error)]
pub enum ConstraintError {
    /// At least one error-level violation; carries the full report.
    #[error("Model is inconsistent:\n{0}")]
    Violated(Violations),
}

impl ConstraintError {
    pub fn violations(&self) -> &Violations {
        match self {
            ConstraintError::Violated(v) => v,
        }
    }

    pub fn into_violations(self) -> Violations {
        match self {
            ConstraintError::Violated(v) => v,
        }
    }
}
