//! Report-building session: accumulated corpus plus the transitions
//! (ingest, reset, compile-and-generate) that act on it.
//!
//! A session is an owned value. Each logical user session must own its
//! own `SessionController`; instances are never shared between sessions.

pub mod accumulator;
pub mod controller;

pub use accumulator::{Accumulator, Snapshot};
pub use controller::{IngestReceipt, Report, SessionController, SessionState, SessionView};

use thiserror::Error;

use crate::pipeline::extraction::DocumentReadError;
use crate::pipeline::generation::GenerationError;

/// The four ways a session action can fail. Every variant is terminal to
/// the triggering action and leaves the session unchanged.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    DocumentRead(#[from] DocumentReadError),

    #[error("No documents have been ingested; add at least one PDF before generating")]
    EmptyCorpus,

    #[error("No API credential configured")]
    MissingCredential,

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl SessionError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DocumentRead(_) => "document_read",
            Self::EmptyCorpus => "empty_corpus",
            Self::MissingCredential => "missing_credential",
            Self::Generation(_) => "generation",
        }
    }
}
