pub mod types;
pub mod format;
pub mod pdf;
pub mod orchestrator;

pub use types::*;
pub use format::*;
pub use pdf::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("not a PDF document")]
    NotPdf,

    #[error("document is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),
}

/// A single document could not be turned into text.
///
/// Local to one ingestion attempt; carries the offending identifier.
#[derive(Error, Debug)]
#[error("Failed to read document {document}: {source}")]
pub struct DocumentReadError {
    pub document: String,
    #[source]
    pub source: ExtractionError,
}

impl DocumentReadError {
    pub fn new(document: impl Into<String>, source: ExtractionError) -> Self {
        Self {
            document: document.into(),
            source,
        }
    }
}
