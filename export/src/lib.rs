//! Kinetic Export
//!
//! Serializes a finalized model for external consumers.
//!
//! Responsibilities:
//! - The `Exporter` interface
//! - A JSON interchange document (`JsonExporter`)
//! - A human-readable equation listing (`EquationListing`)

mod document;
mod error;
mod json;
mod listing;

pub use document::*;
pub use error::{ExportError, ExportResult};
pub use json::JsonExporter;
pub use listing::EquationListing;

use kinetic_model::Finalized;

/// Serialized output with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedDocument {
    pub media_type: &'static str,
    pub content: String,
}

/// A serializer for finalized models.
pub trait Exporter {
    fn emit(&self, model: &Finalized) -> ExportResult<SerializedDocument>;
}
