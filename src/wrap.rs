//! Instrumented views over subject values.
//!
//! [`wrap`] turns a [`Value`] into a [`Wrapped`] façade whose structural
//! reads enforce matching semantics: a genuinely absent field or a
//! wrong-shaped access fails with a depth-stamped rejection instead of a
//! plain `None`, and iteration requests hand out a [`SeqCursor`] that
//! detects under-consumed sequences.
//!
//! Views over containers are memoized by container identity in a
//! process-wide registry. The registry holds weak references, so it never
//! keeps a subject alive; the memoize-or-create step runs under a single
//! lock, so exactly one live view exists per container at any time, even
//! under concurrent construction.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};

use tracing::trace;

use crate::cursor::SeqCursor;
use crate::error::{MatchError, MatchResult};
use crate::value::Value;

/// Prune dead registry entries whenever the map grows past another multiple
/// of this many entries.
const PRUNE_INTERVAL: usize = 64;

/// Instrumented, ownership-transparent view over a subject value.
///
/// Derefs to [`Value`], so plain accessors (`as_i64`, `as_str`, ...) work
/// directly in guard code. Cloning is cheap and preserves view identity.
#[derive(Clone)]
pub struct Wrapped {
    inner: Arc<ViewInner>,
}

struct ViewInner {
    value: Value,
}

fn registry() -> &'static Mutex<HashMap<usize, Weak<ViewInner>>> {
    static REGISTRY: OnceLock<Mutex<HashMap<usize, Weak<ViewInner>>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Container identity: the address of the shared allocation. Scalars have no
/// identity and are never memoized.
fn identity(value: &Value) -> Option<usize> {
    match value {
        Value::Seq(items) => Some(Arc::as_ptr(items) as usize),
        Value::Map(map) => Some(Arc::as_ptr(map) as usize),
        _ => None,
    }
}

/// Instruments a value for matching.
///
/// Scalars and null pass through with no memoization. Sequences and mappings
/// resolve through the identity registry: wrapping the same container twice
/// (directly, or via an aliased substructure) yields the identical view, so
/// identity-sensitive matcher code sees one façade per container.
pub fn wrap(value: impl Into<Value>) -> Wrapped {
    let value = value.into();
    let Some(key) = identity(&value) else {
        return Wrapped {
            inner: Arc::new(ViewInner { value }),
        };
    };

    // Single lock over lookup + insert: memoize-or-create is atomic per
    // identity.
    let mut registry = registry().lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(existing) = registry.get(&key).and_then(Weak::upgrade) {
        return Wrapped { inner: existing };
    }
    let inner = Arc::new(ViewInner { value });
    registry.insert(key, Arc::downgrade(&inner));
    if registry.len() % PRUNE_INTERVAL == 0 {
        registry.retain(|_, view| view.strong_count() > 0);
    }
    Wrapped { inner }
}

impl Wrapped {
    /// Reads field `key`, rejecting at the current depth when the key is
    /// genuinely unset or the value is not a mapping.
    ///
    /// Presence is the only test here: a present-but-falsy value (`0`,
    /// `false`, `""`, an empty sequence) passes through, wrapped recursively
    /// so nested destructuring stays instrumented.
    pub fn field(&self, key: &str) -> MatchResult<Wrapped> {
        match &self.inner.value {
            Value::Map(map) => match map.get(key) {
                Some(found) => Ok(wrap(found.clone())),
                None => {
                    trace!(key, "field absent, rejecting");
                    Err(MatchError::unmatched())
                }
            },
            other => {
                trace!(key, shape = shape_name(other), "field read on non-mapping, rejecting");
                Err(MatchError::unmatched())
            }
        }
    }

    /// Iteration request: a fresh single-use cursor over a sequence.
    ///
    /// Rejects at the current depth when the value is not a sequence: a
    /// sequence pattern does not fit a mapping or a scalar.
    pub fn items(&self) -> MatchResult<SeqCursor> {
        match &self.inner.value {
            Value::Seq(items) => Ok(SeqCursor::new(Arc::clone(items))),
            other => {
                trace!(shape = shape_name(other), "iteration of non-sequence, rejecting");
                Err(MatchError::unmatched())
            }
        }
    }

    /// The underlying value.
    pub fn value(&self) -> &Value {
        &self.inner.value
    }

    /// View identity: true iff both views came from the same memoized
    /// container entry. Scalar views are only identical to their clones.
    pub fn ptr_eq(a: &Wrapped, b: &Wrapped) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Int(_) => "int",
        Value::Float(_) => "float",
        Value::Str(_) => "str",
        Value::Seq(_) => "seq",
        Value::Map(_) => "map",
    }
}

impl Deref for Wrapped {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.inner.value
    }
}

impl From<Wrapped> for Value {
    fn from(view: Wrapped) -> Self {
        view.inner.value.clone()
    }
}

impl PartialEq for Wrapped {
    fn eq(&self, other: &Self) -> bool {
        self.inner.value == other.inner.value
    }
}

impl PartialEq<Value> for Wrapped {
    fn eq(&self, other: &Value) -> bool {
        &self.inner.value == other
    }
}

impl fmt::Debug for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Wrapped").field(&self.inner.value).finish()
    }
}

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner.value, f)
    }
}

/// Test hook: whether the registry currently holds a live view for this
/// container.
#[cfg(test)]
pub(crate) fn registry_has_live_view(value: &Value) -> bool {
    let Some(key) = identity(value) else {
        return false;
    };
    let registry = registry().lock().unwrap_or_else(PoisonError::into_inner);
    registry.get(&key).is_some_and(|view| view.strong_count() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_pass_through() {
        let view = wrap(10);
        assert_eq!(view.as_i64(), Some(10));
        assert!(wrap(Value::Null).is_null());
    }

    #[test]
    fn test_field_presence() {
        let view = wrap(Value::from(json!({"foo": 0, "bar": {"x": 20}})));

        // Present-but-falsy is not absence.
        assert_eq!(view.field("foo").unwrap().as_i64(), Some(0));
        // Nested reads stay instrumented.
        assert_eq!(view.field("bar").unwrap().field("x").unwrap().as_i64(), Some(20));

        let err = view.field("missing").unwrap_err();
        assert!(err.is_unmatched());
    }

    #[test]
    fn test_field_on_non_mapping_rejects() {
        assert!(wrap(10).field("foo").unwrap_err().is_unmatched());
        assert!(wrap(Value::from(json!([1, 2]))).field("foo").unwrap_err().is_unmatched());
    }

    #[test]
    fn test_items_on_non_sequence_rejects() {
        assert!(wrap(Value::from(json!({"a": 1}))).items().unwrap_err().is_unmatched());
        assert!(wrap("text").items().unwrap_err().is_unmatched());
    }

    #[test]
    fn test_identity_memoization() {
        let shared = Value::from(vec![Value::Int(1)]);
        let subject = Value::from(
            [
                ("left".to_string(), shared.clone()),
                ("right".to_string(), shared),
            ]
            .into_iter()
            .collect::<std::collections::BTreeMap<_, _>>(),
        );

        let view = wrap(subject.clone());
        let left = view.field("left").unwrap();
        let right = view.field("right").unwrap();
        assert!(Wrapped::ptr_eq(&left, &right));

        // Wrapping the whole subject again resolves to the identical view.
        assert!(Wrapped::ptr_eq(&view, &wrap(subject)));
    }

    #[test]
    fn test_distinct_containers_get_distinct_views() {
        let a = wrap(Value::from(vec![Value::Int(1)]));
        let b = wrap(Value::from(vec![Value::Int(1)]));
        assert!(!Wrapped::ptr_eq(&a, &b));
        // Structurally equal all the same.
        assert_eq!(a, b);
    }

    #[test]
    fn test_registry_entries_die_with_views() {
        let subject = Value::from(vec![Value::Int(42), Value::Int(43)]);
        {
            let _view = wrap(subject.clone());
            assert!(registry_has_live_view(&subject));
        }
        assert!(!registry_has_live_view(&subject));
    }

    #[test]
    fn test_deref_and_display() {
        let view = wrap(Value::from(json!({"a": 1})));
        assert!(view.get("a").is_some());
        assert_eq!(view.to_string(), r#"{"a":1}"#);
    }
}
