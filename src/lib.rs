//! dynmatch: structural pattern matching for dynamically-shaped values
//!
//! This library provides a generic match operator over nested mapping- and
//! sequence-like data. Given a subject value and an ordered list of matcher
//! closures, [`match_value`] tries each in turn against an instrumented view
//! of the subject; a matcher matches by returning `Ok` and rejects exactly
//! when a structural access (missing field, under-consumed sequence) or an
//! explicit [`guard()`] cannot be satisfied, at which point the next matcher
//! is tried.
//!
//! # Features
//!
//! - **Absence-aware field reads**: a missing key rejects the branch; a
//!   present-but-falsy value passes through
//! - **Remainder-aware sequences**: fixed-arity patterns detect both
//!   too-short and silently-too-long subjects
//! - **Reentrancy-scoped rejections**: a nested, unrelated `match_value`
//!   exhausting its matchers is never mistaken for the current matcher's
//!   own mismatch
//! - **Identity-memoized views**: aliased substructures resolve to the
//!   identical view, so identity-sensitive guard code works
//! - **serde interop**: subjects convert from `serde_json::Value` and any
//!   serde format
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dynmatch::prelude::*;
//! use serde_json::json;
//!
//! let outcome = match_value(
//!     Value::from(json!({"bar": {"x": 20}})),
//!     vec![
//!         matcher(|v: Wrapped| Ok(format!("foo {}", v.field("foo")?))),
//!         matcher(|v: Wrapped| {
//!             let x = v.field("bar")?.field("x")?;
//!             Ok(format!("bar with x {x}"))
//!         }),
//!     ],
//! )?;
//! assert_eq!(outcome, "bar with x 20");
//! ```
//!
//! # Module Organization
//!
//! - [`value`]: the dynamic [`Value`] model and serde interop
//! - [`wrap`]: instrumented views with identity-keyed memoization
//! - [`cursor`]: single-use sequence cursors with under-consumption checks
//! - [`guard`]: the explicit assertion primitive
//! - [`dispatch`]: the match operator and its depth scoping
//! - [`error`]: typed error handling
//! - [`logging`]: tracing subscriber bootstrap for embedding applications

pub mod cursor;
mod depth;
pub mod dispatch;
pub mod error;
pub mod guard;
pub mod logging;
pub mod prelude;
pub mod value;
pub mod wrap;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{MatchError, MatchResult, Rejection};

// Value model
pub use value::Value;

// Instrumented views
pub use wrap::{wrap, Wrapped};

// Sequence cursors
pub use cursor::SeqCursor;

// Guards
pub use guard::guard;

// The match operator
pub use dispatch::{match_value, match_value_with, matcher, MatchFn, MatchOptions};

// Logging
pub use logging::init_structured_logging;
