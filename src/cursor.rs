//! Single-use forward cursors over sequence subjects.
//!
//! A fixed-arity sequence pattern binds exactly the first N elements and
//! then declares it wants no more. Left unchecked, that would let a length-2
//! pattern silently match a length-5 sequence. [`SeqCursor::finish`] closes
//! the hole: it probes for one further element, and rejects when the pattern
//! under-consumed the sequence without capturing a remainder.

use std::sync::Arc;

use crate::error::{MatchError, MatchResult};
use crate::value::Value;
use crate::wrap::{wrap, Wrapped};

/// Forward cursor over one sequence, enforcing remainder-aware consumption.
///
/// Obtained from [`Wrapped::items`](crate::Wrapped::items); each iteration
/// request gets a fresh cursor. Exhaustion is idempotent: once the cursor is
/// exhausted, every later [`take`](Self::take) rejects,
/// [`finish`](Self::finish) succeeds, and [`remainder`](Self::remainder)
/// returns nothing.
#[derive(Debug)]
pub struct SeqCursor {
    items: Arc<Vec<Value>>,
    pos: usize,
}

impl SeqCursor {
    pub(crate) fn new(items: Arc<Vec<Value>>) -> Self {
        Self { items, pos: 0 }
    }

    /// Binds the next element, wrapped recursively.
    ///
    /// Rejects at the current depth when the sequence is exhausted: a
    /// pattern asking for more elements than exist does not fit.
    pub fn take(&mut self) -> MatchResult<Wrapped> {
        match self.items.get(self.pos) {
            Some(element) => {
                self.pos += 1;
                Ok(wrap(element.clone()))
            }
            None => Err(MatchError::unmatched()),
        }
    }

    /// Declares that a fixed-arity pattern wants no more elements.
    ///
    /// Probes for one further element. If the sequence is exhausted the
    /// early stop was legitimate; otherwise the pattern under-consumed the
    /// sequence without a remainder capture, and the branch rejects at the
    /// current depth. A pattern that drained the cursor (via `take` to
    /// exhaustion or `remainder`) always finishes cleanly.
    pub fn finish(&mut self) -> MatchResult<()> {
        if self.pos < self.items.len() {
            Err(MatchError::unmatched())
        } else {
            Ok(())
        }
    }

    /// Drains every remaining element: the remainder capture after a fixed
    /// prefix.
    pub fn remainder(&mut self) -> Vec<Wrapped> {
        let rest = self.items[self.pos..]
            .iter()
            .map(|element| wrap(element.clone()))
            .collect();
        self.pos = self.items.len();
        rest
    }

    /// Total length of the underlying sequence.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements not yet consumed.
    pub fn remaining(&self) -> usize {
        self.items.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.items.len()
    }
}
