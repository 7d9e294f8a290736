//! Error types for `params-core`.

use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The family name does not match any table in the database.
  #[error("specified table {table:?} does not exist (accepted tables {accepted:?})")]
  UnknownTable {
    table:    String,
    accepted: BTreeSet<String>,
  },

  /// One or more selector keys are not columns of the target table(s).
  #[error("selection identifiers {keys:?} not all in accepted keys {accepted:?}")]
  UnknownColumns {
    keys:     Vec<String>,
    accepted: BTreeSet<String>,
  },

  #[error("table kind {kind:?} is invalid (accepted kinds {accepted:?})")]
  InvalidKind {
    kind:     String,
    accepted: &'static [&'static str],
  },
}

impl Error {
  /// `true` for errors caused by a table or column name that failed schema
  /// validation.
  pub fn is_invalid_identifier(&self) -> bool {
    matches!(self, Error::UnknownTable { .. } | Error::UnknownColumns { .. })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
