pub mod gemini;
pub mod gemini_types;

pub use gemini::*;

use thiserror::Error;

use crate::credential::ApiCredential;

/// Shown with quota failures; recovery is left to the operator.
pub const QUOTA_ADVICE: &str =
    "Quota errors are usually transient: process fewer months at a time or wait about a minute and retry.";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Authentication rejected by generation backend (status {status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("Generation quota exceeded: {message}")]
    Quota { message: String },

    #[error("Generation backend unreachable: {0}")]
    Transport(String),

    #[error("Generation backend unavailable (status {status}): {message}")]
    Unavailable { status: u16, message: String },

    #[error("Generation backend returned error (status {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Generation blocked by backend: {0}")]
    ContentBlocked(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

impl GenerationError {
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::Quota { .. })
    }

    /// Operator guidance attached to the error, if any.
    pub fn advice(&self) -> Option<&'static str> {
        self.is_quota().then_some(QUOTA_ADVICE)
    }
}

/// Text-generation backend: prompt in, report out.
///
/// One call per user trigger. Implementations must not retry.
pub trait TextGenerator {
    fn generate(&self, credential: &ApiCredential, request: &str) -> Result<String, GenerationError>;
}
