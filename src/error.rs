//! Typed error handling for matching.
//!
//! Two kinds of failure flow out of a matcher: the recoverable "this pattern
//! did not fit" rejection, and everything else. A dispatcher may reinterpret
//! a rejection as "try the next matcher" only when the rejection was raised
//! at its own reentrancy depth; any other failure surfaces unchanged.

use thiserror::Error;

use crate::depth;

/// The "no match" signal, stamped with the reentrancy depth that was active
/// when it was raised.
///
/// The stamp is private: once a rejection escapes the outermost `match_value`
/// call it is a uniform "unmatched pattern" failure, and callers distinguish
/// it via [`MatchError::is_unmatched`].
#[derive(Debug, Clone)]
pub struct Rejection {
    depth: u64,
}

impl Rejection {
    pub(crate) fn at(depth: u64) -> Self {
        Self { depth }
    }

    /// Fresh rejection stamped with the ambient depth.
    pub(crate) fn here() -> Self {
        Self::at(depth::current())
    }

    pub(crate) fn depth(&self) -> u64 {
        self.depth
    }
}

/// Main error type for matching operations.
#[derive(Error, Debug)]
pub enum MatchError {
    /// No candidate matched, or a structural access / guard failed.
    #[error("unmatched pattern")]
    Unmatched(Rejection),

    /// Reentrant matching exceeded the configured depth limit.
    #[error("matching depth limit of {limit} exceeded")]
    DepthExceeded { limit: u64 },

    /// Arbitrary failure raised by a matcher body. Never reinterpreted:
    /// propagates unchanged through every dispatcher level.
    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}

impl MatchError {
    /// A rejection stamped at the current reentrancy depth.
    ///
    /// Matcher bodies may return this directly to reject a branch without
    /// going through `guard`.
    pub fn unmatched() -> Self {
        Self::Unmatched(Rejection::here())
    }

    /// Wrap an arbitrary matcher-body failure.
    pub fn fault(err: impl Into<anyhow::Error>) -> Self {
        Self::Fault(err.into())
    }

    /// Whether this is the "no pattern matched" failure kind.
    pub fn is_unmatched(&self) -> bool {
        matches!(self, Self::Unmatched(_))
    }

    /// Whether this is a rejection owned by the dispatcher at `depth`.
    pub(crate) fn rejected_at(&self, depth: u64) -> bool {
        matches!(self, Self::Unmatched(r) if r.depth() == depth)
    }
}

/// Convenience type alias for matching results.
pub type MatchResult<T> = Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_is_distinguishable() {
        let err = MatchError::unmatched();
        assert!(err.is_unmatched());
        assert_eq!(err.to_string(), "unmatched pattern");
    }

    #[test]
    fn test_fault_is_not_unmatched() {
        let err = MatchError::fault(anyhow::anyhow!("boom"));
        assert!(!err.is_unmatched());
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_rejection_ownership_is_depth_exact() {
        let err = MatchError::Unmatched(Rejection::at(3));
        assert!(err.rejected_at(3));
        assert!(!err.rejected_at(2));
        assert!(!err.rejected_at(4));
    }

    #[test]
    fn test_depth_exceeded_is_not_a_rejection() {
        let err = MatchError::DepthExceeded { limit: 4 };
        assert!(!err.is_unmatched());
        assert!(!err.rejected_at(4));
        assert!(err.to_string().contains("limit of 4"));
    }
}
