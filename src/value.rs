//! Dynamic value model for match subjects.
//!
//! `Value` is the crate's mapping/sequence/scalar data model. Containers are
//! reference-counted, so distinct parts of a subject may alias the same
//! substructure and container identity (the shared allocation) is observable
//! by the view registry in [`crate::wrap`].
//!
//! Interop goes through serde_json: any `serde_json::Value` converts
//! losslessly into a `Value`, and `Value` serializes/deserializes with any
//! serde format by bridging through its JSON form.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// A dynamically-shaped value: scalar, sequence, or mapping.
///
/// Sequences and mappings sit behind `Arc`, so cloning a `Value` is cheap and
/// shares the underlying container.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Arc<Vec<Value>>),
    Map(Arc<BTreeMap<String, Value>>),
}

impl Value {
    /// Host truthiness rule, applied by [`crate::guard()`] and nowhere else.
    ///
    /// `Null`, `false`, `0`, `0.0` (and NaN), and the empty string are falsy.
    /// Everything else is truthy, including empty sequences and empty maps.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(x) => !x.is_nan() && *x != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Seq(_) | Value::Map(_) => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view: integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Plain (uninstrumented) field lookup. Matcher code should go through
    /// [`crate::Wrapped::field`] instead, which turns absence into a
    /// rejection.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Parses JSON text into a `Value`.
    pub fn from_json_str(text: &str) -> Result<Value> {
        serde_json::from_str::<serde_json::Value>(text)
            .map(Value::from)
            .context("invalid JSON for match subject")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&serde_json::Value::from(self), f)
    }
}

// --- scalar conversions ---

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

// --- container conversions ---

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(Arc::new(items))
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(Arc::new(map))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

// --- serde_json interop ---

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(Arc::new(items.into_iter().map(Value::from).collect()))
            }
            serde_json::Value::Object(map) => Value::Map(Arc::new(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            // Non-finite floats have no JSON form and render as null.
            Value::Float(x) => serde_json::Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Seq(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness_scalars() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::Float(-0.0).is_truthy());
        assert!(!Value::Float(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());

        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(Value::Float(0.5).is_truthy());
        assert!(Value::from("x").is_truthy());
    }

    #[test]
    fn test_empty_containers_are_truthy() {
        assert!(Value::from(Vec::new()).is_truthy());
        assert!(Value::from(BTreeMap::new()).is_truthy());
    }

    #[test]
    fn test_json_round_trip() {
        let v = Value::from(json!({"foo": 10, "bar": [1, 2.5, "x", null, true]}));
        let back: serde_json::Value = (&v).into();
        assert_eq!(back, json!({"foo": 10, "bar": [1, 2.5, "x", null, true]}));
    }

    #[test]
    fn test_from_json_str() {
        let v = Value::from_json_str(r#"{"a": [1, 2]}"#).unwrap();
        assert_eq!(v.get("a").and_then(Value::as_seq).map(<[Value]>::len), Some(2));
        assert!(Value::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_display_is_json() {
        let v = Value::from(json!({"a": 1}));
        assert_eq!(v.to_string(), r#"{"a":1}"#);
    }

    #[test]
    fn test_serde_bridge() {
        let v: Value = serde_json::from_str(r#"[1, {"k": "v"}]"#).unwrap();
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"[1,{"k":"v"}]"#);
    }

    #[test]
    fn test_clone_shares_containers() {
        let v = Value::from(vec![Value::Int(1)]);
        let w = v.clone();
        match (&v, &w) {
            (Value::Seq(a), Value::Seq(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected sequences"),
        }
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Int(7).as_f64(), Some(7.0));
        assert_eq!(Value::Float(1.5).as_i64(), None);
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert!(Value::Null.is_null());
        assert_eq!(Value::from(true).as_bool(), Some(true));
    }
}
