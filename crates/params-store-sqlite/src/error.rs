//! Error type for `params-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] params_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("i/o error on {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("confirmation prompt failed: {0}")]
  Prompt(#[source] std::io::Error),

  #[error("invalid artifact pattern: {0}")]
  Pattern(#[from] glob::PatternError),

  #[error("artifact lookup failed: {0}")]
  Glob(#[from] glob::GlobError),

  /// An output row's `file` column holds something other than a path.
  #[error("output row {rowid:?} has a {found} `file` column, expected text")]
  FileColumn {
    rowid: Option<i64>,
    found: &'static str,
  },
}

impl Error {
  pub fn is_invalid_identifier(&self) -> bool {
    matches!(self, Error::Core(e) if e.is_invalid_identifier())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
