//! Value enum for dynamic cell values

use std::borrow::Cow;
use std::fmt;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A dynamic value held by a row cell.
///
/// Rows expose their cells as `Value`s so the engine can filter and sort
/// without knowing the concrete row type.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true/false | `Bool` |
/// | integer | `Int` |
/// | fractional number | `Float` |
/// | string | `String` |
/// | array, object | `Json` |
///
/// `Guid` and `DateTime` are never produced by deserialization; hosts build
/// them from typed data.
///
/// # Example
///
/// ```
/// use tabula::model::Value;
///
/// let name = Value::from("Ann");
/// let age = Value::from(41i64);
/// let empty = Value::Null;
/// assert_eq!(age.as_number(), Some(41.0));
/// assert!(empty.to_text().is_none());
/// assert_eq!(name.to_text().as_deref(), Some("Ann"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/missing value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// Fallback for nested JSON values.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Guid(_) => "guid",
            Value::DateTime(_) => "datetime",
            Value::Json(_) => "json",
        }
    }

    /// Returns the numeric value if this is an `Int` or `Float`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns `true` if this value compares numerically.
    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    /// Default textual form used for matching and lexical sorting.
    ///
    /// `Null` has no text.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        let text = match self {
            Value::Null => return None,
            Value::String(s) => return Some(Cow::Borrowed(s)),
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => format_float(*v),
            Value::Guid(v) => v.hyphenated().to_string(),
            Value::DateTime(v) => v.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::Json(v) => match v {
                serde_json::Value::Null => return None,
                serde_json::Value::String(s) => return Some(Cow::Borrowed(s)),
                other => other.to_string(),
            },
        };
        Some(Cow::Owned(text))
    }
}

/// Integral floats print without a fractional part (`3.0` reads as `3`).
///
/// Floats of magnitude 1e15 and above use `f64`'s `Display`, which writes
/// plain digits at any magnitude and never switches to exponent notation.
fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
