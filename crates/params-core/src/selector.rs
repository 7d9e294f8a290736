//! Selectors and the `WHERE` clauses built from them.
//!
//! A [`Selector`] is an insertion-ordered list of `column = value`
//! conditions. [`FilterClause`] renders it to SQL text with `?` placeholders
//! and keeps the bound values in the same order, so placeholder `n` always
//! lines up with value `n`.
//!
//! Column names end up interpolated into the SQL text; they must be checked
//! against the live schema before a clause is built.

use std::fmt;

use crate::Value;

// ─── Selector ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
  entries: Vec<(String, Value)>,
}

impl Selector {
  pub fn new() -> Self { Self::default() }

  /// Builder-style [`Selector::insert`].
  pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
    self.insert(column, value);
    self
  }

  /// Add a condition. Re-inserting a column replaces its value in place.
  pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
    let column = column.into();
    let value = value.into();
    match self.entries.iter_mut().find(|(name, _)| *name == column) {
      Some((_, existing)) => *existing = value,
      None => self.entries.push((column, value)),
    }
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(name, _)| name.as_str())
  }

  pub fn values(&self) -> impl Iterator<Item = &Value> {
    self.entries.iter().map(|(_, value)| value)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.entries.iter().map(|(name, value)| (name.as_str(), value))
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Selector {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut selector = Selector::new();
    for (k, v) in iter {
      selector.insert(k, v);
    }
    selector
  }
}

impl fmt::Display for Selector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("{")?;
    for (i, (name, value)) in self.entries.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{name}={value}")?;
    }
    f.write_str("}")
  }
}

// ─── FilterClause ────────────────────────────────────────────────────────────

/// A rendered `WHERE` clause plus its positional parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterClause {
  /// `WHERE a=? AND b=?`, or the empty string for an empty selector.
  pub sql:    String,
  pub params: Vec<Value>,
}

impl FilterClause {
  /// Build a clause, optionally qualifying every column as `qualifier.col`.
  pub fn build(selector: &Selector, qualifier: Option<&str>) -> Self {
    Self::build_with(selector, |_| qualifier.map(str::to_owned))
  }

  /// Build a clause, asking `qualify` for the table qualifier of each column.
  pub fn build_with<F>(selector: &Selector, qualify: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    if selector.is_empty() {
      return Self::default();
    }

    let conditions: Vec<String> = selector
      .keys()
      .map(|key| match qualify(key) {
        Some(table) => format!("{table}.{key}=?"),
        None => format!("{key}=?"),
      })
      .collect();

    Self {
      sql:    format!("WHERE {}", conditions.join(" AND ")),
      params: selector.values().cloned().collect(),
    }
  }

  pub fn is_empty(&self) -> bool { self.sql.is_empty() }
}
