//! Session state machine.
//!
//! ```text
//!            ingest                 compile_and_generate (ok)
//!  Empty ───────────▶ Accumulating ─────────────────────────▶ Generated
//!    ▲                 │  ▲    ▲ ingest                          │
//!    │      reset      │  │    └─────────────────────────────────┘
//!    └─────────────────┴──┴──────────────── reset ◀──────────────┘
//! ```
//!
//! The state is derived from the data rather than stored: no documents is
//! `Empty`; documents plus a report is `Generated`; otherwise
//! `Accumulating`. Every failing action returns before mutating anything.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::accumulator::{Accumulator, Snapshot};
use super::SessionError;
use crate::credential::ApiCredential;
use crate::pipeline::compiler::compile;
use crate::pipeline::extraction::{
    extract_batch, DocumentExtractor, ExtractedDocument, UploadedDocument,
};
use crate::pipeline::generation::TextGenerator;
use crate::pipeline::prompt_templates::instruction_template;

/// Media type of the downloadable report.
pub const REPORT_MEDIA_TYPE: &str = "text/markdown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No documents ingested.
    Empty,
    /// At least one document, no successful generation since the last change.
    Accumulating,
    /// Last compile-and-generate succeeded and nothing was added since.
    Generated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Accumulating => write!(f, "accumulating"),
            Self::Generated => write!(f, "generated"),
        }
    }
}

/// The synthesized annual report, offered as a download.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub markdown: String,
    pub file_name: String,
    pub media_type: &'static str,
    /// Documents in the corpus the report was generated from.
    pub document_count: usize,
    pub generated_at: DateTime<Utc>,
}

/// Result of a successful ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReceipt {
    pub document: String,
    pub pages: usize,
    pub chars: usize,
    pub total_documents: usize,
}

/// Display-oriented summary of the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub state: SessionState,
    pub documents: Vec<String>,
    pub corpus_chars: usize,
    pub credential_configured: bool,
    pub report_available: bool,
}

/// One user's report-building session.
pub struct SessionController {
    id: Uuid,
    extractor: Box<dyn DocumentExtractor + Send + Sync>,
    generator: Box<dyn TextGenerator + Send + Sync>,
    accumulator: Accumulator,
    credential: Option<ApiCredential>,
    report: Option<Report>,
    report_file_name: String,
}

impl SessionController {
    pub fn new(
        extractor: Box<dyn DocumentExtractor + Send + Sync>,
        generator: Box<dyn TextGenerator + Send + Sync>,
        report_file_name: impl Into<String>,
    ) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session = %id, "Session created");
        Self {
            id,
            extractor,
            generator,
            accumulator: Accumulator::new(),
            credential: None,
            report: None,
            report_file_name: report_file_name.into(),
        }
    }

    /// Start with a pre-provisioned credential.
    pub fn with_credential(mut self, credential: Option<ApiCredential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    // ── Read path ───────────────────────────────────────

    pub fn state(&self) -> SessionState {
        if self.accumulator.is_empty() {
            SessionState::Empty
        } else if self.report.is_some() {
            SessionState::Generated
        } else {
            SessionState::Accumulating
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.accumulator.snapshot()
    }

    /// Report from the last successful generation, while still current.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn view(&self) -> SessionView {
        let snapshot = self.snapshot();
        SessionView {
            session_id: self.id,
            state: self.state(),
            documents: snapshot.ingested_documents.to_vec(),
            corpus_chars: snapshot.accumulated_text.chars().count(),
            credential_configured: self.has_credential(),
            report_available: self.report.is_some(),
        }
    }

    // ── Transitions ─────────────────────────────────────

    /// Replace the credential with one typed in by the user.
    pub fn set_credential(&mut self, credential: ApiCredential) {
        self.credential = Some(credential);
        tracing::info!(session = %self.id, "API credential set for session");
    }

    /// Extract one document and append it to the corpus.
    ///
    /// The upload is consumed. On extraction failure the corpus is left
    /// exactly as it was.
    pub fn ingest(&mut self, document: UploadedDocument) -> Result<IngestReceipt, SessionError> {
        let extracted = match self.extractor.extract(&document) {
            Ok(extracted) => extracted,
            Err(e) => {
                tracing::warn!(session = %self.id, document = %document.name, error = %e, "Ingestion rejected");
                return Err(e.into());
            }
        };
        Ok(self.accept(extracted))
    }

    /// Ingest several uploads as one batch.
    ///
    /// Every document is extracted first; successes are then appended in
    /// input order and failures are reported in their own slot without
    /// touching the corpus.
    pub fn ingest_batch(
        &mut self,
        documents: Vec<UploadedDocument>,
    ) -> Vec<Result<IngestReceipt, SessionError>> {
        let outcomes = extract_batch(self.extractor.as_ref(), &documents);
        let results: Vec<_> = outcomes
            .into_iter()
            .map(|outcome| match outcome {
                Ok(extracted) => Ok(self.accept(extracted)),
                Err(e) => Err(SessionError::from(e)),
            })
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::info!(
            session = %self.id,
            submitted = results.len(),
            failed,
            "Batch ingestion complete"
        );
        results
    }

    fn accept(&mut self, extracted: ExtractedDocument) -> IngestReceipt {
        let document = self.accumulator.append(&extracted.document_id, &extracted.text);
        self.report = None;

        let receipt = IngestReceipt {
            document,
            pages: extracted.page_count,
            chars: extracted.text.chars().count(),
            total_documents: self.accumulator.len(),
        };
        tracing::info!(
            session = %self.id,
            document = %receipt.document,
            total_documents = receipt.total_documents,
            "Document ingested"
        );
        receipt
    }

    /// Discard all accumulated documents and any report. Always succeeds.
    pub fn reset(&mut self) {
        let dropped = self.accumulator.len();
        self.accumulator.reset();
        self.report = None;
        tracing::info!(session = %self.id, dropped_documents = dropped, "Session reset");
    }

    /// Compile the outbound request without sending it.
    pub fn compile_request(&self) -> Result<String, SessionError> {
        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            return Err(SessionError::EmptyCorpus);
        }
        Ok(compile(instruction_template(), &snapshot))
    }

    /// Compile the corpus and send it to the generator once.
    ///
    /// Preconditions are checked in order (corpus, then credential) and no
    /// request is sent when either fails. A generator failure leaves the
    /// session untouched.
    pub fn compile_and_generate(&mut self) -> Result<&Report, SessionError> {
        let request = match self.compile_request() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(session = %self.id, "Generation requested with empty corpus");
                return Err(e);
            }
        };
        let Some(credential) = self.credential.as_ref() else {
            tracing::warn!(session = %self.id, "Generation requested without credential");
            return Err(SessionError::MissingCredential);
        };

        let document_count = self.accumulator.len();
        tracing::info!(
            session = %self.id,
            documents = document_count,
            request_chars = request.chars().count(),
            "Compiling annual report"
        );

        let markdown = match self.generator.generate(credential, &request) {
            Ok(markdown) => markdown,
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "Report generation failed");
                return Err(e.into());
            }
        };

        tracing::info!(session = %self.id, report_chars = markdown.chars().count(), "Report generated");
        Ok(self.report.insert(Report {
            markdown,
            file_name: self.report_file_name.clone(),
            media_type: REPORT_MEDIA_TYPE,
            document_count,
            generated_at: Utc::now(),
        }))
    }
}
