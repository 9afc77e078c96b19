//! Document upload endpoints.
//!
//! `POST /api/session/documents`: exactly one PDF in the multipart `file`
//! field. `POST /api/session/documents/batch`: any number of `file`
//! fields, each reported on its own. Extraction runs on the blocking pool
//! while the session guard is held, so uploads are ingested strictly one
//! after another.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::pipeline::extraction::UploadedDocument;
use crate::session::{IngestReceipt, SessionView};

#[derive(Serialize)]
pub struct UploadResponse {
    pub ingested: IngestReceipt,
    pub session: SessionView,
}

/// Per-file outcome of a batch upload.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchItem {
    Ingested { receipt: IngestReceipt },
    Failed { document: String, message: String },
}

#[derive(Serialize)]
pub struct BatchUploadResponse {
    pub results: Vec<BatchItem>,
    pub session: SessionView,
}

/// Read every `file` field, in order. Other fields are ignored.
async fn read_files(multipart: &mut Multipart) -> Result<Vec<UploadedDocument>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("document.pdf").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {e}")))?;
        files.push(UploadedDocument::new(name, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(ApiError::BadRequest("No file provided".into()));
    }
    Ok(files)
}

pub async fn upload(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut files = read_files(&mut multipart).await?;
    if files.len() > 1 {
        return Err(ApiError::BadRequest(format!(
            "Expected one file, got {}; use /api/session/documents/batch for several",
            files.len()
        )));
    }
    let document = files.remove(0);
    tracing::debug!(document = %document.name, bytes = document.bytes.len(), "Upload received");

    let mut guard = ctx.session.clone().lock_owned().await;
    let response = tokio::task::spawn_blocking(move || {
        let ingested = guard.ingest(document)?;
        Ok::<_, ApiError>(UploadResponse {
            ingested,
            session: guard.view(),
        })
    })
    .await??;

    Ok(Json(response))
}

/// Multi-file upload. Always 200 once the body parses; failures are
/// listed per document and leave the corpus untouched.
pub async fn upload_batch(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<BatchUploadResponse>, ApiError> {
    let files = read_files(&mut multipart).await?;
    tracing::debug!(files = files.len(), "Batch upload received");

    let mut guard = ctx.session.clone().lock_owned().await;
    let response = tokio::task::spawn_blocking(move || {
        let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        let results = guard
            .ingest_batch(files)
            .into_iter()
            .zip(names)
            .map(|(outcome, document)| match outcome {
                Ok(receipt) => BatchItem::Ingested { receipt },
                Err(e) => BatchItem::Failed {
                    document,
                    message: e.to_string(),
                },
            })
            .collect();
        BatchUploadResponse {
            results,
            session: guard.view(),
        }
    })
    .await?;

    Ok(Json(response))
}
