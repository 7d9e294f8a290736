//! Conversions between [`params_core::Value`] and rusqlite's value types.

use params_core::{Row, Value};
use rusqlite::types::{Value as SqlValue, ValueRef};

pub fn encode_value(value: &Value) -> SqlValue {
  match value {
    Value::Null => SqlValue::Null,
    Value::Integer(i) => SqlValue::Integer(*i),
    Value::Real(r) => SqlValue::Real(*r),
    Value::Text(s) => SqlValue::Text(s.clone()),
    Value::Blob(b) => SqlValue::Blob(b.clone()),
  }
}

pub fn encode_params(values: &[Value]) -> Vec<SqlValue> {
  values.iter().map(encode_value).collect()
}

/// Text that is not valid UTF-8 is returned as [`Value::Blob`] with its
/// bytes unchanged, never as altered text.
pub fn decode_value(value: ValueRef<'_>) -> Value {
  match value {
    ValueRef::Null => Value::Null,
    ValueRef::Integer(i) => Value::Integer(i),
    ValueRef::Real(r) => Value::Real(r),
    ValueRef::Text(t) => match std::str::from_utf8(t) {
      Ok(s) => Value::Text(s.to_owned()),
      Err(_) => Value::Blob(t.to_vec()),
    },
    ValueRef::Blob(b) => Value::Blob(b.to_vec()),
  }
}

/// Decode every column of `row`, pairing values with `names` by position.
pub fn decode_row(names: &[String], row: &rusqlite::Row<'_>) -> rusqlite::Result<Row> {
  names
    .iter()
    .enumerate()
    .map(|(idx, name)| Ok((name.clone(), decode_value(row.get_ref(idx)?))))
    .collect()
}
