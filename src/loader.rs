//! The cancelable query loader.
//!
//! One loader instance owns one result slot and runs at most one live
//! activation at a time. Activations are keyed by a caller-supplied
//! dependency sequence; starting with an unchanged key is a no-op, a
//! changed key supersedes the in-flight activation. Supersede and stop are
//! resolved by activation order, not completion order: only the latest
//! activation may ever reach a terminal state, even if an older fetch
//! finishes after it.
//!
//! Correctness does not depend on fetchers honoring cancellation. Each
//! activation carries a generation number and a [`CancelToken`]; a
//! resolution whose generation is stale or whose token is cancelled is
//! dropped without touching the result slot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::deps::Deps;
use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::state::{QueryState, QueryStatus};
use crate::token::CancelToken;

/// Single-owner orchestrator for one logical query.
///
/// Consumers observe progress through [`QueryLoader::subscribe`]; the only
/// mutations available to them are `start`, `restart` and `stop` on the
/// loader itself.
pub struct QueryLoader<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    result: watch::Sender<QueryState<T>>,
    generation: AtomicU64,
    active: Mutex<Option<Activation>>,
}

/// Record of the activation currently owning the result slot.
struct Activation {
    generation: u64,
    token: CancelToken,
    /// `None` for an unkeyed activation (a `restart` before any `start`);
    /// it never compares equal to a caller-supplied key, so it cannot
    /// swallow a later `start` with an empty key.
    deps: Option<Deps>,
}

impl<T> QueryLoader<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (result, _) = watch::channel(QueryState::Idle);
        Self {
            inner: Arc::new(Inner {
                result,
                generation: AtomicU64::new(0),
                active: Mutex::new(None),
            }),
        }
    }

    /// Run one logical fetch for the given activation key.
    ///
    /// If the current activation already carries an identical key, nothing
    /// happens and `false` is returned: one fetch per activation, whether
    /// it is still pending or already terminal. Otherwise the previous
    /// activation (if any) is cancelled, the result slot moves to
    /// `Pending`, and the fetcher is spawned onto the tokio runtime.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(&self, fetcher: F, deps: Deps) -> bool
    where
        F: Fetcher<T>,
    {
        let mut active = self.inner.active.lock();
        if let Some(current) = active.as_ref() {
            if current.deps.as_ref() == Some(&deps) {
                tracing::trace!(
                    target: "requery::loader",
                    generation = current.generation,
                    "start with unchanged key ignored"
                );
                return false;
            }
        }
        self.activate(&mut active, fetcher, Some(deps));
        true
    }

    /// Force a fresh fetch with the current activation key, superseding any
    /// in-flight one. With no prior activation the fetch runs unkeyed, and
    /// any later `start` supersedes it.
    pub fn restart<F>(&self, fetcher: F)
    where
        F: Fetcher<T>,
    {
        let mut active = self.inner.active.lock();
        let deps = active.as_ref().and_then(|a| a.deps.clone());
        self.activate(&mut active, fetcher, deps);
    }

    fn activate<F>(&self, active: &mut Option<Activation>, fetcher: F, deps: Option<Deps>)
    where
        F: Fetcher<T>,
    {
        if let Some(previous) = active.take() {
            previous.token.cancel();
            tracing::debug!(
                target: "requery::loader",
                generation = previous.generation,
                "activation superseded"
            );
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancelToken::new();
        *active = Some(Activation {
            generation,
            token: token.clone(),
            deps,
        });
        self.inner.result.send_replace(QueryState::Pending);
        tracing::debug!(target: "requery::loader", generation, "activation started");

        let inner = Arc::clone(&self.inner);
        let fetch = fetcher.fetch(token.clone());
        tokio::spawn(async move {
            let outcome = fetch.await;
            inner.settle(generation, &token, outcome);
        });
    }

    /// Tear down the current activation: cancel its token, discard its
    /// (possibly pending) result, return to `Idle`. Idempotent; safe with
    /// nothing in flight. A stopped loader accepts a fresh `start`.
    pub fn stop(&self) {
        let mut active = self.inner.active.lock();
        if let Some(previous) = active.take() {
            previous.token.cancel();
            tracing::debug!(
                target: "requery::loader",
                generation = previous.generation,
                "activation stopped"
            );
        }
        self.inner.result.send_replace(QueryState::Idle);
    }

    /// Snapshot of the current result state.
    pub fn state(&self) -> QueryState<T> {
        self.inner.result.borrow().clone()
    }

    pub fn status(&self) -> QueryStatus {
        self.inner.result.borrow().status()
    }

    /// Read-only view for consumers (presentation layers, tests).
    pub fn subscribe(&self) -> QueryWatcher<T> {
        QueryWatcher {
            rx: self.inner.result.subscribe(),
        }
    }
}

impl<T> Default for QueryLoader<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Inner<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Apply a fetch resolution to the result slot, unless it is stale.
    fn settle(&self, generation: u64, token: &CancelToken, outcome: Result<T, FetchError>) {
        let active = self.active.lock();
        let live = !token.is_cancelled()
            && active
                .as_ref()
                .is_some_and(|a| a.generation == generation);
        if !live {
            tracing::trace!(target: "requery::loader", generation, "stale resolution dropped");
            return;
        }

        match outcome {
            Ok(value) => {
                tracing::debug!(target: "requery::loader", generation, "activation succeeded");
                self.result.send_replace(QueryState::Success(value));
            }
            Err(err) if err.is_cancelled() => {
                // The fetcher reported cancellation on a live activation.
                // Not an error: the result slot keeps its last known state.
                tracing::trace!(
                    target: "requery::loader",
                    generation,
                    "cancellation resolution dropped"
                );
            }
            Err(err) => {
                let message = err.to_string();
                tracing::debug!(
                    target: "requery::loader",
                    generation,
                    error = %message,
                    "activation failed"
                );
                self.result.send_replace(QueryState::Error(vec![message]));
            }
        }
    }
}

/// Read-only consumer handle over a loader's result slot.
pub struct QueryWatcher<T> {
    rx: watch::Receiver<QueryState<T>>,
}

impl<T> QueryWatcher<T>
where
    T: Clone,
{
    /// Current state, without waiting.
    pub fn snapshot(&self) -> QueryState<T> {
        self.rx.borrow().clone()
    }

    /// Wait for the next published state and return it. If the loader is
    /// gone, returns the last state it published.
    pub async fn changed(&mut self) -> QueryState<T> {
        let _ = self.rx.changed().await;
        self.rx.borrow_and_update().clone()
    }

    /// Wait until the loader publishes a terminal state (Success or Error)
    /// and return it. Returns the last known state if the loader is
    /// dropped first.
    pub async fn wait_terminal(&mut self) -> QueryState<T> {
        loop {
            {
                let current = self.rx.borrow_and_update();
                if current.is_terminal() {
                    return current.clone();
                }
            }
            if self.rx.changed().await.is_err() {
                return self.rx.borrow().clone();
            }
        }
    }
}
