//! Explicit assertion primitive for matcher bodies.

use crate::error::{MatchError, MatchResult};
use crate::value::Value;
use crate::wrap::{wrap, Wrapped};

/// Rejects the current branch when `condition` is falsy; otherwise returns
/// an instrumented view of the condition for further destructuring.
///
/// Truthiness follows [`Value::is_truthy`]: `Null`, `false`, `0`, `0.0`
/// (and NaN), and the empty string reject; everything else passes, including
/// empty sequences and maps. `From<bool>` makes plain boolean conditions
/// read naturally:
///
/// ```rust,ignore
/// let answer = view.field("answer")?;
/// guard(answer != Value::Int(42))?;
/// ```
///
/// The rejection carries the reentrancy depth active at the call, so only
/// the dispatcher that owns this branch treats it as "try the next matcher".
pub fn guard(condition: impl Into<Value>) -> MatchResult<Wrapped> {
    let condition = condition.into();
    if condition.is_truthy() {
        Ok(wrap(condition))
    } else {
        Err(MatchError::unmatched())
    }
}
