use crate::common::Document;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};

/// A dynamically-typed field value.
///
/// `Value` is the unit of data exchanged between entities, filters, and the
/// store boundary. Documents map string keys to values; filters compare
/// values; the store persists them.
///
/// # Ordering
///
/// Values of the same variant compare naturally. Mixed numeric variants
/// (`I32`, `I64`, `F64`) compare by numeric value. Equal values always
/// compare as `Some(Equal)`, keeping `PartialOrd` consistent with
/// `PartialEq`. Any other mixed pair is unordered, which range filters
/// report as a non-match rather than an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The null value; also the result of reading an absent document field
    #[default]
    Null,
    /// A boolean value
    Bool(bool),
    /// A signed 32-bit integer value
    I32(i32),
    /// A signed 64-bit integer value
    I64(i64),
    /// A 64-bit floating point value
    F64(f64),
    /// A string value
    String(String),
    /// A UTC timestamp value
    DateTime(DateTime<Utc>),
    /// An array of values
    Array(Vec<Value>),
    /// A nested document value
    Document(Document),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I32(i) => Some(*i as i64),
            Value::I64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&String> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(document) => Some(document),
            _ => None,
        }
    }

    pub fn is_document(&self) -> bool {
        matches!(self, Value::Document(_))
    }

    /// Checks whether this value participates in ordering comparisons.
    pub fn is_comparable(&self) -> bool {
        !matches!(self, Value::Null | Value::Array(_) | Value::Document(_))
    }

    // Numeric promotion for mixed integer/float comparison.
    fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::I32(i) => Some(*i as f64),
            Value::I64(i) => Some(*i as f64),
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.partial_cmp(b),
            _ => match (self.as_numeric(), other.as_numeric()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                // equal values of the remaining variants must still compare
                // equal to keep PartialOrd consistent with PartialEq
                _ if self == other => Some(Ordering::Equal),
                _ => None,
            },
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I32(i) => write!(f, "{}", i),
            Value::I64(i) => write!(f, "{}", i),
            Value::F64(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Array(array) => {
                write!(f, "[")?;
                for (i, v) in array.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Document(document) => write!(f, "{}", document),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::I64(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_is_null() {
        assert!(Value::default().is_null());
    }

    #[test]
    fn from_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::I32(42));
        assert_eq!(Value::from(42i64), Value::I64(42));
        assert_eq!(Value::from(42u32), Value::I64(42));
        assert_eq!(Value::from(1.5f64), Value::F64(1.5));
        assert_eq!(Value::from("abc"), Value::String("abc".to_string()));
        assert_eq!(Value::from(Some(1i32)), Value::I32(1));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[test]
    fn numeric_promotion_in_ordering() {
        assert_eq!(
            Value::I32(2).partial_cmp(&Value::I64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::F64(2.5).partial_cmp(&Value::I32(2)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::I64(3).partial_cmp(&Value::F64(3.0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn mixed_non_numeric_is_unordered() {
        assert!(Value::String("a".to_string())
            .partial_cmp(&Value::I32(1))
            .is_none());
        assert!(Value::Null.partial_cmp(&Value::Bool(true)).is_none());
        assert!(Value::Array(vec![Value::I32(1)])
            .partial_cmp(&Value::Array(vec![Value::I32(2)]))
            .is_none());
    }

    #[test]
    fn partial_ord_agrees_with_partial_eq() {
        let cases = [
            (Value::Null, Value::Null),
            (
                Value::Array(vec![Value::I32(1)]),
                Value::Array(vec![Value::I32(1)]),
            ),
            (Value::Document(Document::new()), Value::Document(Document::new())),
            (Value::I32(3), Value::I32(3)),
            (Value::Null, Value::String("x".to_string())),
        ];
        for (a, b) in cases {
            assert_eq!(
                a == b,
                a.partial_cmp(&b) == Some(Ordering::Equal),
                "PartialEq/PartialOrd disagree for {:?} vs {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn date_time_ordering() {
        let early = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert!(Value::DateTime(early) < Value::DateTime(late));
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::I32(7).as_i64(), Some(7));
        assert_eq!(Value::I64(7).as_i32(), None);
        assert_eq!(
            Value::String("x".to_string()).as_string(),
            Some(&"x".to_string())
        );
        assert!(Value::Array(vec![]).as_array().is_some());
        assert!(!Value::Array(vec![]).is_comparable());
        assert!(Value::I32(1).is_comparable());
    }

    #[test]
    fn display_formats() {
        assert_eq!(format!("{}", Value::Null), "null");
        assert_eq!(format!("{}", Value::I64(5)), "5");
        assert_eq!(
            format!("{}", Value::Array(vec![Value::I32(1), Value::I32(2)])),
            "[1, 2]"
        );
    }
}
