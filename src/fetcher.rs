//! The fetcher contract.

use std::future::Future;

use crate::error::FetchError;
use crate::token::CancelToken;

/// A single-shot capability: given a cancellation token, produce a payload
/// or fail.
///
/// Fetchers are supplied by the caller and consumed by exactly one loader
/// invocation; the loader holds no ownership beyond that. A well-behaved
/// fetcher honors the token by halting I/O and resolving with
/// [`FetchError::Cancelled`], but loader correctness does not depend on it:
/// stale resolutions are dropped either way.
///
/// Any `FnOnce(CancelToken) -> Future<Output = Result<T, FetchError>>`
/// qualifies, so closures and async blocks are fetchers.
pub trait Fetcher<T>: Send + 'static {
    fn fetch(self, token: CancelToken) -> impl Future<Output = Result<T, FetchError>> + Send;
}

impl<T, F, Fut> Fetcher<T> for F
where
    F: FnOnce(CancelToken) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send,
{
    fn fetch(self, token: CancelToken) -> impl Future<Output = Result<T, FetchError>> + Send {
        self(token)
    }
}
