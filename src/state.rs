//! Observable query state.
//!
//! The enum shape encodes the result invariant structurally: data exists
//! only in `Success`, messages only in `Error`, and neither while `Idle`
//! or `Pending`. `Idle` and a `Success` carrying an empty collection are
//! distinct observable states.

/// Progress of the loader's current activation.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// No activation has run since construction or the last `stop`.
    Idle,
    /// An activation is in flight.
    Pending,
    /// The live activation resolved with a payload.
    Success(T),
    /// The live activation failed; messages are ordered, human-readable.
    Error(Vec<String>),
}

/// Flat discriminant of [`QueryState`], for consumers that only branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Pending,
    Success,
    Error,
}

impl<T> QueryState<T> {
    pub fn status(&self) -> QueryStatus {
        match self {
            QueryState::Idle => QueryStatus::Idle,
            QueryState::Pending => QueryStatus::Pending,
            QueryState::Success(_) => QueryStatus::Success,
            QueryState::Error(_) => QueryStatus::Error,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, QueryState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }

    /// Success or Error; once reached, only a new `start` can change it.
    pub fn is_terminal(&self) -> bool {
        matches!(self, QueryState::Success(_) | QueryState::Error(_))
    }

    /// The payload, if the state is `Success`.
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Error messages; empty unless the state is `Error`.
    pub fn error_messages(&self) -> &[String] {
        match self {
            QueryState::Error(messages) => messages,
            _ => &[],
        }
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        QueryState::Idle
    }
}
