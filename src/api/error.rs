//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::session::SessionError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    /// Operator guidance, e.g. for quota failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, hint) = match &self {
            ApiError::Session(err) => match err {
                SessionError::DocumentRead(e) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DOCUMENT_READ",
                    e.to_string(),
                    None,
                ),
                SessionError::EmptyCorpus => (
                    StatusCode::CONFLICT,
                    "EMPTY_CORPUS",
                    err.to_string(),
                    None,
                ),
                SessionError::MissingCredential => (
                    StatusCode::PRECONDITION_REQUIRED,
                    "MISSING_CREDENTIAL",
                    "API key not found. Enter one or configure the secrets store.".to_string(),
                    None,
                ),
                SessionError::Generation(e) if e.is_quota() => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "GENERATION_QUOTA",
                    e.to_string(),
                    e.advice(),
                ),
                SessionError::Generation(e) => (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    e.to_string(),
                    e.advice(),
                ),
            },
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone(), None),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone(), None)
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                hint,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("session task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    use crate::pipeline::extraction::{DocumentReadError, ExtractionError};
    use crate::pipeline::generation::{GenerationError, QUOTA_ADVICE};

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn document_read_returns_422_with_name() {
        let err: ApiError = SessionError::from(DocumentReadError::new(
            "Mar.pdf",
            ExtractionError::NotPdf,
        ))
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "DOCUMENT_READ");
        assert!(json["error"]["message"].as_str().unwrap().contains("Mar.pdf"));
    }

    #[tokio::test]
    async fn empty_corpus_returns_409() {
        let response = ApiError::from(SessionError::EmptyCorpus).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["error"]["code"], "EMPTY_CORPUS");
    }

    #[tokio::test]
    async fn missing_credential_returns_428() {
        let response = ApiError::from(SessionError::MissingCredential).into_response();
        assert_eq!(response.status(), StatusCode::PRECONDITION_REQUIRED);
        assert_eq!(body_json(response).await["error"]["code"], "MISSING_CREDENTIAL");
    }

    #[tokio::test]
    async fn quota_returns_429_with_backend_message_and_hint() {
        let err = SessionError::from(GenerationError::Quota {
            message: "Resource has been exhausted".into(),
        });
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "GENERATION_QUOTA");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Resource has been exhausted"));
        assert_eq!(json["error"]["hint"], QUOTA_ADVICE);
    }

    #[tokio::test]
    async fn other_generation_failure_returns_502_verbatim() {
        let err = SessionError::from(GenerationError::Authentication {
            status: 400,
            message: "API key not valid".into(),
        });
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert!(json["error"]["message"].as_str().unwrap().contains("API key not valid"));
        assert!(json["error"].get("hint").is_none());
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("lock poisoned".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }
}
