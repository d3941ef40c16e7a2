//! Prelude module for convenient imports.
//!
//! Import the matching surface with a single line:
//!
//! ```rust,ignore
//! use dynmatch::prelude::*;
//! ```

// The match operator
pub use crate::dispatch::{match_value, match_value_with, matcher, MatchFn, MatchOptions};

// Explicit guards
pub use crate::guard::guard;

// Instrumented views
pub use crate::wrap::{wrap, Wrapped};

// Sequence cursors
pub use crate::cursor::SeqCursor;

// Value model
pub use crate::value::Value;

// Error types
pub use crate::error::{MatchError, MatchResult};
