//! Session router.
//!
//! Returns a composable `Router` with the JSON API under `/api/` and the
//! upload page at `/`.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::page;
use crate::api::types::ApiContext;

/// Build the router for one shared session.
pub fn session_router(ctx: ApiContext) -> Router {
    let body_limit = ctx.body_limit();

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/session", get(endpoints::session::show))
        .route("/session/reset", post(endpoints::session::reset))
        .route("/session/credential", put(endpoints::session::set_credential))
        .route("/session/documents", post(endpoints::documents::upload))
        .route("/session/documents/batch", post(endpoints::documents::upload_batch))
        .route("/session/report", post(endpoints::report::generate))
        .route("/session/report/download", get(endpoints::report::download))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .route("/", get(page::index))
        .nest("/api", api)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
}
