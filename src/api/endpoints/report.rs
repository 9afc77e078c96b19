//! Report generation and download.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::session::{Report, SessionView};

#[derive(Serialize)]
pub struct GenerateResponse {
    pub report: Report,
    pub session: SessionView,
}

/// `POST /api/session/report`: compile the corpus and call the backend once.
///
/// The call can take minutes; the session guard is held throughout so no
/// upload or reset interleaves with it.
pub async fn generate(State(ctx): State<ApiContext>) -> Result<Json<GenerateResponse>, ApiError> {
    let mut guard = ctx.session.clone().lock_owned().await;
    let response = tokio::task::spawn_blocking(move || {
        let report = guard.compile_and_generate()?.clone();
        Ok::<_, ApiError>(GenerateResponse {
            report,
            session: guard.view(),
        })
    })
    .await??;

    Ok(Json(response))
}

/// `GET /api/session/report/download`: the current report as a Markdown file.
pub async fn download(State(ctx): State<ApiContext>) -> Result<Response, ApiError> {
    let session = ctx.session.lock().await;
    let report = session
        .report()
        .ok_or_else(|| ApiError::NotFound("No report has been generated for the current documents".into()))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                format!("{}; charset=utf-8", report.media_type),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.file_name),
            ),
        ],
        report.markdown.clone(),
    )
        .into_response())
}
