//! Shared state for the HTTP layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::session::SessionController;

/// Multipart framing allowance on top of the document size limit.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Shared context for all API routes.
///
/// The session sits behind an async mutex: every action holds the guard
/// until it completes, so actions on the session never interleave.
#[derive(Clone)]
pub struct ApiContext {
    pub session: Arc<Mutex<SessionController>>,
    pub max_document_bytes: u64,
}

impl ApiContext {
    pub fn new(session: SessionController, max_document_bytes: u64) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            max_document_bytes,
        }
    }

    /// Request body limit for uploads.
    pub fn body_limit(&self) -> usize {
        usize::try_from(self.max_document_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES))
            .unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::controller::test_support::*;

    #[test]
    fn body_limit_adds_multipart_overhead() {
        let session = SessionController::new(
            Box::new(StubExtractor::new(&[])),
            Box::new(StubGenerator::new(StubBehavior::EchoLength)),
            "r.md",
        );
        let ctx = ApiContext::new(session, 10 * 1024 * 1024);
        assert_eq!(ctx.body_limit(), 11 * 1024 * 1024);
    }
}
