//! JSON interchange document.

use crate::document::ModelDocument;
use crate::{Exporter, ExportResult, SerializedDocument};
use kinetic_model::Finalized;

/// Emits a [`ModelDocument`] as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    pub pretty: bool,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Exporter for JsonExporter {
    fn emit(&self, model: &Finalized) -> ExportResult<SerializedDocument> {
        let document = ModelDocument::from_model(model);
        let content = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(SerializedDocument {
            media_type: "application/json",
            content,
        })
    }
}
