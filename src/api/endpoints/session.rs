//! Session inspection, reset and credential entry.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::credential::ApiCredential;
use crate::session::SessionView;

#[derive(Deserialize)]
pub struct CredentialRequest {
    pub api_key: String,
}

/// `GET /api/session`
pub async fn show(State(ctx): State<ApiContext>) -> Json<SessionView> {
    Json(ctx.session.lock().await.view())
}

/// `POST /api/session/reset`: drop every document and any report.
pub async fn reset(State(ctx): State<ApiContext>) -> Json<SessionView> {
    let mut session = ctx.session.lock().await;
    session.reset();
    Json(session.view())
}

/// `PUT /api/session/credential`: key typed in by the user.
///
/// The key itself is never echoed back.
pub async fn set_credential(
    State(ctx): State<ApiContext>,
    Json(req): Json<CredentialRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let credential = ApiCredential::new(&req.api_key)
        .ok_or_else(|| ApiError::BadRequest("api_key must not be empty".into()))?;

    let mut session = ctx.session.lock().await;
    session.set_credential(credential);
    Ok(Json(session.view()))
}
