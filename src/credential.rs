//! API credential held in memory only.
//!
//! - Never persisted by this process and never written to logs
//! - Zeroed on drop
//! - `Debug` output is redacted

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret key for the text-generation backend.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ApiCredential {
    secret: String,
}

impl ApiCredential {
    /// Wrap a raw key. Returns `None` for blank input, which counts as
    /// "no usable credential".
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let mut raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            raw.zeroize();
            return None;
        }
        let secret = trimmed.to_string();
        raw.zeroize();
        Some(Self { secret })
    }

    /// Borrow the secret for the outbound request.
    pub fn expose(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}
