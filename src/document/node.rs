//! Document value representation.
//!
//! A document is a tree of objects, arrays and scalars. Objects keep their
//! keys in insertion order so that serialization is deterministic and
//! matches the order in which entries were parsed or written.
//!
//! # Example
//!
//! ```
//! use docquill::document::node::{DocNumber, DocValue};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), DocValue::from("docquill"));
//! map.insert("version".to_string(), DocValue::Number(DocNumber::Integer(1)));
//! let doc = DocValue::Object(map);
//!
//! assert!(doc.is_object());
//! assert_eq!(doc.get("name").and_then(DocValue::as_str), Some("docquill"));
//! ```

use indexmap::IndexMap;
use std::fmt;

/// Represents document numbers (integer or float).
///
/// `Unsigned` only holds integers above `i64::MAX`; everything that fits
/// an `i64` is an `Integer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocNumber {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl fmt::Display for DocNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocNumber::Integer(i) => write!(f, "{}", i),
            DocNumber::Unsigned(u) => write!(f, "{}", u),
            DocNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl DocNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            DocNumber::Integer(i) => *i as f64,
            DocNumber::Unsigned(u) => *u as f64,
            DocNumber::Float(f) => *f,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DocNumber::Integer(i) => Some(*i),
            DocNumber::Unsigned(u) => i64::try_from(*u).ok(),
            DocNumber::Float(_) => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            DocNumber::Integer(i) => u64::try_from(*i).ok(),
            DocNumber::Unsigned(u) => Some(*u),
            DocNumber::Float(_) => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, DocNumber::Integer(_) | DocNumber::Unsigned(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DocNumber::Float(_))
    }
}

/// A document value.
///
/// Objects and arrays own their children; every navigation step matches on
/// the variant, so there is no runtime type inspection beyond the tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DocValue {
    /// Key-value pairs in insertion order
    Object(IndexMap<String, DocValue>),
    /// Ordered values
    Array(Vec<DocValue>),
    String(String),
    Number(DocNumber),
    Boolean(bool),
    #[default]
    Null,
}

impl DocValue {
    /// An empty object.
    pub fn object() -> Self {
        DocValue::Object(IndexMap::new())
    }

    /// An empty array.
    pub fn array() -> Self {
        DocValue::Array(Vec::new())
    }

    /// Returns true if this value is an object.
    ///
    /// # Example
    ///
    /// ```
    /// use docquill::document::node::DocValue;
    ///
    /// assert!(DocValue::object().is_object());
    /// assert!(!DocValue::from(42).is_object());
    /// ```
    pub fn is_object(&self) -> bool {
        matches!(self, DocValue::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, DocValue::Array(_))
    }

    /// Returns true if this value is an object or an array.
    pub fn is_container(&self) -> bool {
        matches!(self, DocValue::Object(_) | DocValue::Array(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DocValue::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DocValue::Object(_) => "object",
            DocValue::Array(_) => "array",
            DocValue::String(_) => "string",
            DocValue::Number(_) => "number",
            DocValue::Boolean(_) => "boolean",
            DocValue::Null => "null",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DocValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DocValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DocValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, DocValue>> {
        match self {
            DocValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DocValue]> {
        match self {
            DocValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up an object entry by key.
    pub fn get(&self, key: &str) -> Option<&DocValue> {
        self.as_object()?.get(key)
    }

    /// Looks up an array element by position.
    pub fn get_index(&self, index: usize) -> Option<&DocValue> {
        self.as_array()?.get(index)
    }
}

impl From<bool> for DocValue {
    fn from(v: bool) -> Self {
        DocValue::Boolean(v)
    }
}

impl From<i64> for DocValue {
    fn from(v: i64) -> Self {
        DocValue::Number(DocNumber::Integer(v))
    }
}

impl From<i32> for DocValue {
    fn from(v: i32) -> Self {
        DocValue::Number(DocNumber::Integer(v as i64))
    }
}

impl From<f64> for DocValue {
    fn from(v: f64) -> Self {
        DocValue::Number(DocNumber::Float(v))
    }
}

impl From<&str> for DocValue {
    fn from(v: &str) -> Self {
        DocValue::String(v.to_string())
    }
}

impl From<String> for DocValue {
    fn from(v: String) -> Self {
        DocValue::String(v)
    }
}

impl<T: Into<DocValue>> From<Vec<T>> for DocValue {
    fn from(v: Vec<T>) -> Self {
        DocValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, DocValue>> for DocValue {
    fn from(v: IndexMap<String, DocValue>) -> Self {
        DocValue::Object(v)
    }
}

impl<T: Into<DocValue>> From<Option<T>> for DocValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(DocValue::Null)
    }
}

impl From<serde_json::Value> for DocValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => {
                DocValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            serde_json::Value::Array(items) => {
                DocValue::Array(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::String(s) => DocValue::String(s),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DocValue::Number(DocNumber::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    DocValue::Number(DocNumber::Unsigned(u))
                } else {
                    DocValue::Number(DocNumber::Float(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::Bool(b) => DocValue::Boolean(b),
            serde_json::Value::Null => DocValue::Null,
        }
    }
}

impl From<DocValue> for serde_json::Value {
    fn from(value: DocValue) -> Self {
        match value {
            DocValue::Object(map) => {
                serde_json::Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            DocValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            DocValue::String(s) => serde_json::Value::String(s),
            DocValue::Number(DocNumber::Integer(i)) => serde_json::Value::from(i),
            DocValue::Number(DocNumber::Unsigned(u)) => serde_json::Value::from(u),
            // Non-finite floats have no JSON form.
            DocValue::Number(DocNumber::Float(f)) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            DocValue::Boolean(b) => serde_json::Value::Bool(b),
            DocValue::Null => serde_json::Value::Null,
        }
    }
}
