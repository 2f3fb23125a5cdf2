//! Error taxonomy for fetch attempts.
//!
//! Every failure a fetcher can produce is folded into [`FetchError`]. The
//! loader converts these into result state at its boundary; none propagate
//! to the caller as panics or `Err` returns. Cancellation is explicitly not
//! an error: the loader drops it without touching the result slot.

use thiserror::Error;

/// Errors a fetcher can resolve with.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The invocation was cancelled. Suppressed by the loader; never
    /// surfaced to consumers as an Error state.
    #[error("fetch cancelled")]
    Cancelled,

    /// Network-level failure while talking to the remote endpoint.
    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("upstream returned HTTP {status}")]
    Http { status: u16 },

    /// The payload arrived but could not be decoded.
    #[error("failed to decode payload: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    /// Any other failure, coerced to a human-readable message.
    #[error("{0}")]
    Message(String),
}

impl FetchError {
    /// Build the catch-all variant from anything displayable.
    pub fn message(msg: impl Into<String>) -> Self {
        FetchError::Message(msg.into())
    }

    /// True for the cancellation signal, which the loader drops silently.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}
