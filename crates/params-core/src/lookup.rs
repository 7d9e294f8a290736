//! Result shapes returned by the accessor operations.

use std::path::PathBuf;

use serde::Serialize;

use crate::Row;

/// Result of a parameters lookup.
///
/// A lookup that matches exactly one row yields that row directly; any other
/// count (including zero) yields the full list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamLookup {
  One(Row),
  Many(Vec<Row>),
}

impl ParamLookup {
  pub fn from_rows(mut rows: Vec<Row>) -> Self {
    if rows.len() == 1
      && let Some(row) = rows.pop()
    {
      return ParamLookup::One(row);
    }
    ParamLookup::Many(rows)
  }

  pub fn len(&self) -> usize {
    match self {
      ParamLookup::One(_) => 1,
      ParamLookup::Many(rows) => rows.len(),
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  /// The single row, if exactly one matched.
  pub fn one(&self) -> Option<&Row> {
    match self {
      ParamLookup::One(row) => Some(row),
      ParamLookup::Many(_) => None,
    }
  }

  pub fn into_rows(self) -> Vec<Row> {
    match self {
      ParamLookup::One(row) => vec![row],
      ParamLookup::Many(rows) => rows,
    }
  }
}

/// What a cleanup did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanOutcome {
  /// The operator did not confirm; nothing was touched.
  Declined,
  Deleted {
    files_removed: Vec<PathBuf>,
    rows_deleted:  usize,
  },
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(id: i64) -> Row {
    let mut row = Row::new();
    row.push("rowid", id);
    row
  }

  #[test]
  fn single_row_collapses() {
    let lookup = ParamLookup::from_rows(vec![row(1)]);
    assert_eq!(lookup.one().and_then(Row::rowid), Some(1));
    assert_eq!(lookup.len(), 1);
  }

  #[test]
  fn zero_and_many_rows_stay_lists() {
    assert_eq!(ParamLookup::from_rows(vec![]), ParamLookup::Many(vec![]));

    let lookup = ParamLookup::from_rows(vec![row(1), row(2)]);
    assert!(lookup.one().is_none());
    assert_eq!(lookup.into_rows().len(), 2);
  }

  #[test]
  fn serializes_untagged() {
    let one = serde_json::to_string(&ParamLookup::from_rows(vec![row(1)])).unwrap();
    assert_eq!(one, r#"{"rowid":1}"#);

    let many = serde_json::to_string(&ParamLookup::from_rows(vec![])).unwrap();
    assert_eq!(many, "[]");
  }
}
