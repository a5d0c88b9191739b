//! Export error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("formatting failed")]
    Format(#[from] std::fmt::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
