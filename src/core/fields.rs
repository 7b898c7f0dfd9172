//! Structured fields attached to a log line
//!
//! This module provides:
//! - `FieldValue`: the closed set of value kinds the encoder understands
//! - `Fields`: a map of field names to values

use chrono::{DateTime, Utc};
use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// Value type for structured logging fields
///
/// Integer widths collapse into [`FieldValue::Int`]. Anything without a
/// dedicated variant goes through [`FieldValue::display`] or
/// [`FieldValue::debug`]; booleans use the `Debug` form.
#[derive(Clone)]
pub enum FieldValue {
    String(String),
    /// Raw bytes; invalid UTF-8 is replaced when encoded
    Bytes(Vec<u8>),
    Int(i64),
    Float32(f32),
    Float64(f64),
    /// Formatted with `Display` when the line is written
    Display(Arc<dyn fmt::Display + Send + Sync>),
    /// Formatted with `Debug` when the line is written
    Debug(Arc<dyn fmt::Debug + Send + Sync>),
    /// Rendered with the logger's timestamp format
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Wrap any `Display` type.
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        FieldValue::Display(Arc::new(value))
    }

    /// Wrap any `Debug` type.
    pub fn debug<T>(value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        FieldValue::Debug(Arc::new(value))
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.debug_tuple("String").field(s).finish(),
            FieldValue::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            FieldValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            FieldValue::Float32(v) => f.debug_tuple("Float32").field(v).finish(),
            FieldValue::Float64(v) => f.debug_tuple("Float64").field(v).finish(),
            FieldValue::Display(d) => f.debug_tuple("Display").field(&d.to_string()).finish(),
            FieldValue::Debug(d) => f.debug_tuple("Debug").field(d).finish(),
            FieldValue::Timestamp(t) => f.debug_tuple("Timestamp").field(t).finish(),
        }
    }
}

/// Unescaped text form of the value.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float32(v) => write!(f, "{}", v),
            FieldValue::Float64(v) => write!(f, "{}", v),
            FieldValue::Display(d) => write!(f, "{}", d),
            FieldValue::Debug(d) => write!(f, "{:?}", d),
            FieldValue::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(b: Vec<u8>) -> Self {
        FieldValue::Bytes(b)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(b: &[u8]) -> Self {
        FieldValue::Bytes(b.to_vec())
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(i: $ty) -> Self {
                    FieldValue::Int(i as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, isize, u8, u16, u32);

macro_rules! impl_from_wide_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(u: $ty) -> Self {
                    match i64::try_from(u) {
                        Ok(i) => FieldValue::Int(i),
                        Err(_) => FieldValue::display(u),
                    }
                }
            }
        )*
    };
}

impl_from_wide_unsigned!(u64, usize);

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Float32(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float64(v)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::debug(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(t)
    }
}

impl From<SystemTime> for FieldValue {
    fn from(t: SystemTime) -> Self {
        FieldValue::Timestamp(t.into())
    }
}

/// Named fields written after the fixed fields of a line
///
/// Iteration order is unspecified, so is the order of the fields on the line.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    fields: HashMap<String, FieldValue>,
}

impl Fields {
    /// Create a new empty field set
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a field
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field (mutable version). An existing field with the same name is replaced.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Merge `other` into this set, `other` winning on duplicate names.
    pub fn merge(&mut self, other: Fields) {
        self.fields.extend(other.fields);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = hash_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widths_collapse() {
        assert!(matches!(FieldValue::from(7i8), FieldValue::Int(7)));
        assert!(matches!(FieldValue::from(-7i16), FieldValue::Int(-7)));
        assert!(matches!(FieldValue::from(7i32), FieldValue::Int(7)));
        assert!(matches!(FieldValue::from(7u32), FieldValue::Int(7)));
        assert!(matches!(FieldValue::from(7usize), FieldValue::Int(7)));
        assert!(matches!(FieldValue::from(u64::MAX), FieldValue::Display(_)));
    }

    #[test]
    fn test_float_widths_stay_distinct() {
        assert!(matches!(FieldValue::from(1.5f32), FieldValue::Float32(_)));
        assert!(matches!(FieldValue::from(1.5f64), FieldValue::Float64(_)));
    }

    #[test]
    fn test_display_form() {
        assert_eq!(FieldValue::from("a b").to_string(), "a b");
        assert_eq!(FieldValue::from(true).to_string(), "true");
        assert_eq!(FieldValue::from(vec![b'o', b'k']).to_string(), "ok");
        assert_eq!(FieldValue::debug(Some(3)).to_string(), "Some(3)");
    }

    #[test]
    fn test_fields_insert_and_replace() {
        let mut fields = Fields::new().with_field("user", "alice");
        fields.insert("user", "bob");
        fields.insert("count", 3);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("user").map(ToString::to_string).as_deref(), Some("bob"));
    }

    #[test]
    fn test_fields_merge() {
        let mut base = Fields::new().with_field("a", 1).with_field("b", 2);
        base.merge(Fields::new().with_field("b", 3).with_field("c", 4));

        assert_eq!(base.len(), 3);
        assert!(matches!(base.get("b"), Some(FieldValue::Int(3))));
    }

    #[test]
    fn test_from_iterator() {
        let fields: Fields = vec![("x", 1), ("y", 2)].into_iter().collect();
        assert_eq!(fields.len(), 2);
        assert!(!fields.is_empty());
        assert_eq!((&fields).into_iter().count(), 2);
    }
}
