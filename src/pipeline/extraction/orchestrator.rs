use super::format::check_document;
use super::types::{DocumentExtractor, ExtractedDocument, PdfExtractor, UploadedDocument};
use super::DocumentReadError;

/// Concrete document extractor.
/// Uses a trait object for PDF parsing, enabling dependency injection.
pub struct PdfDocumentExtractor {
    pdf_extractor: Box<dyn PdfExtractor + Send + Sync>,
    max_document_bytes: u64,
}

impl PdfDocumentExtractor {
    pub fn new(pdf_extractor: Box<dyn PdfExtractor + Send + Sync>, max_document_bytes: u64) -> Self {
        Self {
            pdf_extractor,
            max_document_bytes,
        }
    }
}

impl DocumentExtractor for PdfDocumentExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<ExtractedDocument, DocumentReadError> {
        tracing::debug!(
            document = %document.name,
            bytes = document.bytes.len(),
            "Starting text extraction"
        );

        check_document(&document.bytes, self.max_document_bytes)
            .map_err(|e| DocumentReadError::new(&document.name, e))?;

        let pages = self
            .pdf_extractor
            .extract_text(&document.bytes)
            .map_err(|e| DocumentReadError::new(&document.name, e))?;

        let page_count = pages.len();
        let text: String = pages.into_iter().map(|p| p.text).collect();

        tracing::info!(
            document = %document.name,
            pages = page_count,
            chars = text.chars().count(),
            "Text extraction complete"
        );

        Ok(ExtractedDocument {
            document_id: document.name.clone(),
            page_count,
            text,
        })
    }
}

/// Extract many documents, one outcome per input in input order.
///
/// A failing document is logged and reported in its own slot; the
/// remaining documents are still processed.
pub fn extract_batch(
    extractor: &dyn DocumentExtractor,
    documents: &[UploadedDocument],
) -> Vec<Result<ExtractedDocument, DocumentReadError>> {
    documents
        .iter()
        .map(|document| {
            let outcome = extractor.extract(document);
            if let Err(e) = &outcome {
                tracing::warn!(document = %document.name, error = %e, "Batch extraction: document skipped");
            }
            outcome
        })
        .collect()
}
