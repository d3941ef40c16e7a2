//! The match operator: ordered dispatch over candidate matchers.
//!
//! `match_value` tries each matcher in turn against an instrumented view of
//! the subject. A matcher matches by returning `Ok`, and rejects by failing
//! with a rejection stamped at this dispatcher's own depth. Anything else
//! (a rejection raised by a deeper dispatcher, or an arbitrary fault)
//! propagates immediately.
//!
//! The depth stamp is what makes ownership of a rejection exact: a matcher
//! body that itself calls `match_value` on unrelated data and exhausts its
//! own matchers produces a rejection stamped one level deeper, which this
//! dispatcher must not reinterpret as "my pattern didn't fit".

use std::num::NonZeroU64;

use tracing::{debug, trace};

use crate::depth::DepthGuard;
use crate::error::{MatchError, MatchResult, Rejection};
use crate::value::Value;
use crate::wrap::{wrap, Wrapped};

/// A candidate matcher: takes the wrapped subject, returns its result or
/// rejects.
pub type MatchFn<'a, T> = Box<dyn FnMut(Wrapped) -> MatchResult<T> + 'a>;

/// Boxes a closure as a [`MatchFn`], so heterogeneous matchers fit in one
/// list.
pub fn matcher<'a, T, F>(f: F) -> MatchFn<'a, T>
where
    F: FnMut(Wrapped) -> MatchResult<T> + 'a,
{
    Box::new(f)
}

/// Tunables for a dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    /// Maximum reentrancy depth for nested `match_value` calls. `None`
    /// (the default) means unlimited. Exceeding the limit fails with
    /// [`MatchError::DepthExceeded`], which is never treated as a rejection.
    pub max_depth: Option<NonZeroU64>,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reentrancy depth limit; `0` means unlimited.
    pub fn with_max_depth(mut self, limit: u64) -> Self {
        self.max_depth = NonZeroU64::new(limit);
        self
    }
}

/// Tries `matchers` in order against `subject`.
///
/// Returns the first matcher's `Ok` result, skipping the rest. A matcher
/// that rejects at this call's depth is skipped and the next is tried; a
/// rejection from a deeper dispatch or any other failure propagates
/// unchanged, abandoning the remaining matchers. When every matcher
/// rejects, fails with an unmatched-pattern error.
pub fn match_value<'a, T>(
    subject: impl Into<Value>,
    matchers: impl IntoIterator<Item = MatchFn<'a, T>>,
) -> MatchResult<T> {
    match_value_with(subject, matchers, &MatchOptions::default())
}

/// [`match_value`] with explicit [`MatchOptions`].
pub fn match_value_with<'a, T>(
    subject: impl Into<Value>,
    matchers: impl IntoIterator<Item = MatchFn<'a, T>>,
    options: &MatchOptions,
) -> MatchResult<T> {
    // The guard's Drop restores the counter on every exit path below.
    let depth_guard = DepthGuard::enter();
    let depth = depth_guard.depth();

    if let Some(limit) = options.max_depth {
        if depth > limit.get() {
            debug!(depth, limit = limit.get(), "reentrancy depth limit exceeded");
            return Err(MatchError::DepthExceeded { limit: limit.get() });
        }
    }

    let subject = wrap(subject);
    for (index, mut candidate) in matchers.into_iter().enumerate() {
        trace!(depth, index, "trying matcher");
        match candidate(subject.clone()) {
            Ok(result) => {
                trace!(depth, index, "matcher selected");
                return Ok(result);
            }
            Err(err) if err.rejected_at(depth) => {
                trace!(depth, index, "matcher rejected");
            }
            Err(err) => {
                // Foreign rejection or fault: not ours to reinterpret.
                trace!(depth, index, "propagating failure");
                return Err(err);
            }
        }
    }

    debug!(depth, "all matchers rejected");
    Err(MatchError::Unmatched(Rejection::at(depth)))
}
