//! Dynamically-typed column values and rows.
//!
//! The toolbox does not know the schema of a family ahead of time, so rows
//! are kept as ordered `(column, value)` pairs instead of structs.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

// ─── Value ───────────────────────────────────────────────────────────────────

/// A single SQLite value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
  Blob(Vec<u8>),
}

impl Value {
  pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

  pub fn as_integer(&self) -> Option<i64> {
    match self {
      Value::Integer(i) => Some(*i),
      _ => None,
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      Value::Text(s) => Some(s),
      _ => None,
    }
  }

  /// SQLite storage class name, for diagnostics.
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Integer(_) => "integer",
      Value::Real(_) => "real",
      Value::Text(_) => "text",
      Value::Blob(_) => "blob",
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Null => f.write_str("NULL"),
      Value::Integer(i) => write!(f, "{i}"),
      Value::Real(r) => write!(f, "{r:?}"),
      Value::Text(s) => write!(f, "'{s}'"),
      Value::Blob(b) => write!(f, "<{} bytes>", b.len()),
    }
  }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self { Value::Integer(i) }
}

impl From<i32> for Value {
  fn from(i: i32) -> Self { Value::Integer(i.into()) }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self { Value::Integer(b.into()) }
}

impl From<f64> for Value {
  fn from(r: f64) -> Self { Value::Real(r) }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self { Value::Text(s.to_owned()) }
}

impl From<String> for Value {
  fn from(s: String) -> Self { Value::Text(s) }
}

impl From<Vec<u8>> for Value {
  fn from(b: Vec<u8>) -> Self { Value::Blob(b) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(v: Option<T>) -> Self { v.map_or(Value::Null, Into::into) }
}

// ─── Row ─────────────────────────────────────────────────────────────────────

/// One result row, in the column order reported by the database.
///
/// Joins may produce the same column name twice; [`Row::get`] returns the
/// leftmost one and [`Row::iter`] still yields every column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
  columns: Vec<(String, Value)>,
}

impl Row {
  pub fn new() -> Self { Self::default() }

  pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
    self.columns.push((column.into(), value.into()));
  }

  pub fn get(&self, column: &str) -> Option<&Value> {
    self
      .columns
      .iter()
      .find(|(name, _)| name == column)
      .map(|(_, value)| value)
  }

  /// The `rowid` column, if selected and an integer.
  pub fn rowid(&self) -> Option<i64> {
    self.get(crate::ROWID).and_then(Value::as_integer)
  }

  pub fn columns(&self) -> impl Iterator<Item = &str> {
    self.columns.iter().map(|(name, _)| name.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.columns.iter().map(|(name, value)| (name.as_str(), value))
  }

  pub fn len(&self) -> usize { self.columns.len() }

  pub fn is_empty(&self) -> bool { self.columns.is_empty() }
}

impl FromIterator<(String, Value)> for Row {
  fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
    Self { columns: iter.into_iter().collect() }
  }
}

impl Serialize for Row {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.columns.len()))?;
    for (name, value) in &self.columns {
      map.serialize_entry(name, value)?;
    }
    map.end()
  }
}
