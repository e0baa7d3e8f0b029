//! Row trait and row identities.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Value;

/// Field read by the default identity.
pub const ID_FIELD: &str = "id";

/// Trait for records that can be displayed as rows in a table.
///
/// The engine never mutates rows. It reads cells by column key and asks
/// for a natural identity when no custom identity is configured.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
///
/// use tabula::model::{RowId, TableRow, Value};
///
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for User {
///     fn value(&self, key: &str) -> Cow<'_, Value> {
///         match key {
///             "id" => Cow::Owned(Value::from(self.id)),
///             "name" => Cow::Owned(Value::from(self.name.as_str())),
///             _ => Cow::Owned(Value::Null),
///         }
///     }
/// }
///
/// let user = User { id: 7, name: "Ann".into() };
/// assert_eq!(user.natural_id(), Some(RowId::Int(7)));
/// ```
pub trait TableRow {
    /// Read the cell value for a column key. Missing cells are `Value::Null`.
    fn value(&self, key: &str) -> Cow<'_, Value>;

    /// The row's own identity, read from its `id` field.
    fn natural_id(&self) -> Option<RowId> {
        RowId::from_value(&self.value(ID_FIELD))
    }
}

/// Stable identity of a row, independent of where it appears in a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RowId {
    /// Integer id field.
    Int(i64),
    /// Textual id field.
    Text(String),
    /// GUID id field.
    Guid(Uuid),
    /// Index in the source collection (fallback for rows without an id).
    Position(usize),
}

impl RowId {
    /// Derive an identity from a cell value. `Null` has no identity.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Int(v) => Some(RowId::Int(*v)),
            Value::Guid(v) => Some(RowId::Guid(*v)),
            Value::String(s) => Some(RowId::Text(s.clone())),
            Value::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                Some(RowId::Int(*v as i64))
            }
            other => other.to_text().map(|text| RowId::Text(text.into_owned())),
        }
    }

    /// Returns `true` for identities derived from a source position.
    pub fn is_positional(&self) -> bool {
        matches!(self, RowId::Position(_))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(v) => write!(f, "{}", v),
            RowId::Text(v) => f.write_str(v),
            RowId::Guid(v) => write!(f, "{}", v),
            RowId::Position(v) => write!(f, "#{}", v),
        }
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId::Int(v)
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        RowId::Int(v.into())
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        RowId::Text(v.to_string())
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        RowId::Text(v)
    }
}

impl From<Uuid> for RowId {
    fn from(v: Uuid) -> Self {
        RowId::Guid(v)
    }
}

/// Identity function signature: `(row, index in source collection) -> RowId`.
pub type IdentityFn<R> = dyn Fn(&R, usize) -> RowId + Send + Sync;

/// Computes row identities for selection tracking.
///
/// The engine always passes the row's index in the *source* collection,
/// never a position within a filtered, sorted or paged view. Positional
/// identities are therefore stable while the host keeps the same collection,
/// but they follow the position (not the row) when the host replaces the
/// collection with a reordered one. Supply a content-derived identity when
/// rows carry no natural id and the collection can change while selections
/// are held.
pub struct RowIdentity<R> {
    f: Arc<IdentityFn<R>>,
}

impl<R: TableRow + 'static> RowIdentity<R> {
    /// The default identity: the row's `id` field, else its source index.
    pub fn natural() -> Self {
        Self::new(|row: &R, position| row.natural_id().unwrap_or(RowId::Position(position)))
    }
}

impl<R: 'static> RowIdentity<R> {
    /// Create an identity from a custom function.
    pub fn new(f: impl Fn(&R, usize) -> RowId + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    /// Create an identity from a field-derived key, ignoring position.
    pub fn by_key<K: Into<RowId>>(f: impl Fn(&R) -> K + Send + Sync + 'static) -> Self {
        Self::new(move |row, _| f(row).into())
    }
}

impl<R> RowIdentity<R> {
    /// Compute the identity of a row at a source index.
    pub fn resolve(&self, row: &R, position: usize) -> RowId {
        (self.f)(row, position)
    }

    /// Compute identities for a whole source collection.
    pub fn resolve_all(&self, rows: &[R]) -> Vec<RowId> {
        rows.iter()
            .enumerate()
            .map(|(position, row)| self.resolve(row, position))
            .collect()
    }
}

impl<R: TableRow + 'static> Default for RowIdentity<R> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<R> Clone for RowIdentity<R> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<R> fmt::Debug for RowIdentity<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowIdentity").finish_non_exhaustive()
    }
}
