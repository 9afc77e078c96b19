use serde::{Deserialize, Serialize};

use super::{DocumentReadError, ExtractionError};

/// One uploaded document, consumed by a single ingestion.
#[derive(Clone)]
pub struct UploadedDocument {
    /// Original file name. Not required to be unique.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

impl std::fmt::Debug for UploadedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedDocument")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Text extracted from a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageExtraction {
    pub page_number: usize,
    pub text: String,
}

/// Result of text extraction from a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub document_id: String,
    pub page_count: usize,
    /// Page texts joined in page order.
    pub text: String,
}

/// PDF text extraction abstraction
pub trait PdfExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<Vec<PageExtraction>, ExtractionError>;
}

/// Converts one uploaded document into plain text.
///
/// Implementations must not have side effects beyond reading the bytes:
/// the session relies on extraction happening before any mutation.
pub trait DocumentExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<ExtractedDocument, DocumentReadError>;
}
