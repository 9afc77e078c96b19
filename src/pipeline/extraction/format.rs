use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// Formats the extractor recognises.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Unsupported,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Detect document format from magic bytes (NOT file extensions).
pub fn detect_format(bytes: &[u8]) -> DocumentFormat {
    match bytes {
        [b'%', b'P', b'D', b'F', b'-', ..] => DocumentFormat::Pdf,
        _ => DocumentFormat::Unsupported,
    }
}

/// Reject documents the extractor cannot or should not parse.
pub fn check_document(bytes: &[u8], max_bytes: u64) -> Result<(), ExtractionError> {
    let size = bytes.len() as u64;
    if size > max_bytes {
        return Err(ExtractionError::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    match detect_format(bytes) {
        DocumentFormat::Pdf => Ok(()),
        DocumentFormat::Unsupported => Err(ExtractionError::NotPdf),
    }
}
