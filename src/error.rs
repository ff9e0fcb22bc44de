//! Error types for the evictkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache cannot be constructed from the
//!   requested configuration (unknown policy identifier, zero capacity).
//! - [`InvariantError`]: Returned by `check_invariants` methods when internal
//!   bookkeeping disagrees with itself. Seeing one means a bug in this crate,
//!   not a runtime condition to recover from.
//!
//! Cache misses are not errors: `read` returns `None` for absent keys.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::error::ConfigError;
//!
//! let policy: Result<CachePolicy, ConfigError> = "lru".parse();
//! assert!(policy.is_ok());
//!
//! let bad = "cache-fifo".parse::<CachePolicy>().unwrap_err();
//! assert_eq!(bad, ConfigError::UnknownPolicy("cache-fifo".to_string()));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`CachePolicy::from_str`](crate::builder::CachePolicy) and the
/// fallible [`CacheBuilder`](crate::builder::CacheBuilder) constructors.
///
/// # Example
///
/// ```
/// use evictkit::builder::{CacheBuilder, CachePolicy};
/// use evictkit::error::ConfigError;
///
/// let err = CacheBuilder::new(0)
///     .try_build::<u64, u64>(CachePolicy::Lru)
///     .unwrap_err();
/// assert_eq!(err, ConfigError::ZeroCapacity);
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The policy identifier does not name a known eviction strategy.
    UnknownPolicy(String),
    /// A cache was requested with capacity 0.
    ZeroCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownPolicy(name) => {
                write!(f, "unsupported caching algorithm {name:?}")
            },
            ConfigError::ZeroCapacity => f.write_str("cache capacity must be > 0"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on the policy types
/// (e.g. [`ArcCache::check_invariants`](crate::policy::arc::ArcCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_unknown_policy_names_identifier() {
        let err = ConfigError::UnknownPolicy("cache-fifo".into());
        assert_eq!(err.to_string(), "unsupported caching algorithm \"cache-fifo\"");
    }

    #[test]
    fn config_zero_capacity_display() {
        assert_eq!(ConfigError::ZeroCapacity.to_string(), "cache capacity must be > 0");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::UnknownPolicy("x".into());
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, ConfigError::ZeroCapacity);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("T1 and B1 share key 7");
        assert_eq!(err.to_string(), "T1 and B1 share key 7");
        assert_eq!(err.message(), "T1 and B1 share key 7");
    }

    #[test]
    fn invariant_debug_includes_message() {
        let err = InvariantError::new("p out of range");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("p out of range"));
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
