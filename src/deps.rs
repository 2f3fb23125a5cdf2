//! Activation keys.
//!
//! A loader activation is keyed by an ordered sequence of shallow,
//! identity-comparable values. Starting with an unchanged key is a no-op;
//! a changed key supersedes the previous activation.

/// One component of an activation key.
#[derive(Debug, Clone)]
pub enum DepValue {
    Unit,
    Bool(bool),
    Int(i64),
    Uint(u64),
    /// Compared by bit pattern: NaN equals NaN, and `0.0` differs from
    /// `-0.0`. An unchanged NaN key therefore dedupes instead of
    /// refetching on every `start`.
    Float(f64),
    Str(String),
}

impl PartialEq for DepValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DepValue::Unit, DepValue::Unit) => true,
            (DepValue::Bool(a), DepValue::Bool(b)) => a == b,
            (DepValue::Int(a), DepValue::Int(b)) => a == b,
            (DepValue::Uint(a), DepValue::Uint(b)) => a == b,
            (DepValue::Float(a), DepValue::Float(b)) => a.to_bits() == b.to_bits(),
            (DepValue::Str(a), DepValue::Str(b)) => a == b,
            _ => false,
        }
    }
}

/// Ordered activation key. Compared with shallow equality.
pub type Deps = Vec<DepValue>;

impl From<()> for DepValue {
    fn from((): ()) -> Self {
        DepValue::Unit
    }
}

impl From<bool> for DepValue {
    fn from(v: bool) -> Self {
        DepValue::Bool(v)
    }
}

impl From<i32> for DepValue {
    fn from(v: i32) -> Self {
        DepValue::Int(v.into())
    }
}

impl From<i64> for DepValue {
    fn from(v: i64) -> Self {
        DepValue::Int(v)
    }
}

impl From<u32> for DepValue {
    fn from(v: u32) -> Self {
        DepValue::Uint(v.into())
    }
}

impl From<u64> for DepValue {
    fn from(v: u64) -> Self {
        DepValue::Uint(v)
    }
}

impl From<f64> for DepValue {
    fn from(v: f64) -> Self {
        DepValue::Float(v)
    }
}

impl From<&str> for DepValue {
    fn from(v: &str) -> Self {
        DepValue::Str(v.to_string())
    }
}

impl From<String> for DepValue {
    fn from(v: String) -> Self {
        DepValue::Str(v)
    }
}

/// Build an activation key from mixed scalar values.
///
/// ```
/// use requery::deps;
///
/// let key = deps!["users", 2u64, true];
/// assert_eq!(key.len(), 3);
/// ```
#[macro_export]
macro_rules! deps {
    () => {
        ::std::vec::Vec::<$crate::deps::DepValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::deps::DepValue::from($value)),+]
    };
}
