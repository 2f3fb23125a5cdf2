//! Cancelable, supersede-safe asynchronous query loading.
//!
//! A [`QueryLoader`] runs at most one live fetch at a time and exposes its
//! progress as a three-state result (pending / success / error) through
//! read-only watchers. Starting a new activation while one is in flight
//! supersedes it; stopping the loader discards it. In both cases the old
//! fetch can never mutate observable state, no matter when it resolves:
//! last writer wins by activation order, not completion order.
//!
//! Fetchers are caller-supplied async capabilities (see [`Fetcher`]); the
//! [`http`] module ships a GET-over-JSON reference implementation on
//! `reqwest`.
//!
//! ```no_run
//! use requery::{deps, CancelToken, FetchError, QueryLoader};
//!
//! #[tokio::main]
//! async fn main() {
//!     let loader = QueryLoader::new();
//!     loader.start(
//!         |_token: CancelToken| async move { Ok::<_, FetchError>(vec!["ada".to_string()]) },
//!         deps!["users", 1u64],
//!     );
//!
//!     let mut watcher = loader.subscribe();
//!     let state = watcher.wait_terminal().await;
//!     assert_eq!(state.data(), Some(&vec!["ada".to_string()]));
//! }
//! ```

pub mod deps;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod loader;
pub mod state;
pub mod token;

pub use deps::{DepValue, Deps};
pub use error::FetchError;
pub use fetcher::Fetcher;
pub use loader::{QueryLoader, QueryWatcher};
pub use state::{QueryState, QueryStatus};
pub use token::CancelToken;
