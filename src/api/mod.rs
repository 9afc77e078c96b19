//! HTTP surface for a single report-building session.
//!
//! Routes are nested under `/api/`; `GET /` serves the upload page.
//! The router is composable: `session_router()` returns a `Router` that
//! can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod page;
pub mod router;
pub mod server;
pub mod types;

pub use router::session_router;
pub use server::{start_server, AuditorServer, ServerInfo};
pub use types::ApiContext;
