//! Table kinds and the scopes used when validating selectors.
//!
//! A family `exp` owns two physical tables, `exp_parameters` and
//! `exp_output`. [`TableKind`] names one of them; [`KindScope`] names the set
//! of tables whose columns a selector may reference.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Name of the implicit row identifier column, always accepted as a selector
/// key.
pub const ROWID: &str = "rowid";

/// One of the two physical tables of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
  Parameters,
  Output,
}

impl TableKind {
  const NAMES: &'static [&'static str] = &["parameters", "output"];

  pub fn as_str(self) -> &'static str {
    match self {
      TableKind::Parameters => "parameters",
      TableKind::Output => "output",
    }
  }

  /// Physical table name of this kind for `family`.
  ///
  /// `family` is interpolated as-is; callers validate it first.
  pub fn table_name(self, family: &str) -> String {
    format!("{family}_{}", self.as_str())
  }
}

impl fmt::Display for TableKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for TableKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "parameters" => Ok(TableKind::Parameters),
      "output" => Ok(TableKind::Output),
      other => Err(Error::InvalidKind {
        kind:     other.to_owned(),
        accepted: Self::NAMES,
      }),
    }
  }
}

/// The table(s) whose columns a selector is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindScope {
  Parameters,
  Output,
  /// Columns of both tables; used by the join over output and parameters.
  Either,
}

impl KindScope {
  const NAMES: &'static [&'static str] = &["parameters", "output", "either"];

  pub fn kinds(self) -> &'static [TableKind] {
    match self {
      KindScope::Parameters => &[TableKind::Parameters],
      KindScope::Output => &[TableKind::Output],
      KindScope::Either => &[TableKind::Parameters, TableKind::Output],
    }
  }
}

impl From<TableKind> for KindScope {
  fn from(kind: TableKind) -> Self {
    match kind {
      TableKind::Parameters => KindScope::Parameters,
      TableKind::Output => KindScope::Output,
    }
  }
}

impl FromStr for KindScope {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "either" => Ok(KindScope::Either),
      other => other.parse::<TableKind>().map(Into::into).map_err(|_| {
        Error::InvalidKind {
          kind:     other.to_owned(),
          accepted: Self::NAMES,
        }
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn table_name_joins_family_and_kind() {
    assert_eq!(TableKind::Parameters.table_name("exp"), "exp_parameters");
    assert_eq!(TableKind::Output.table_name("exp"), "exp_output");
  }

  #[test]
  fn parse_kinds() {
    assert_eq!("parameters".parse::<TableKind>().unwrap(), TableKind::Parameters);
    assert_eq!("output".parse::<TableKind>().unwrap(), TableKind::Output);
    assert_eq!("either".parse::<KindScope>().unwrap(), KindScope::Either);
    assert_eq!("output".parse::<KindScope>().unwrap(), KindScope::Output);
  }

  #[test]
  fn invalid_kind_is_rejected() {
    let err = "outputs".parse::<TableKind>().unwrap_err();
    assert!(matches!(err, Error::InvalidKind { ref kind, .. } if kind == "outputs"));
    assert!(!err.is_invalid_identifier());

    // Kind names are case-sensitive.
    assert!("Parameters".parse::<KindScope>().is_err());
  }

  #[test]
  fn either_scope_covers_both_tables() {
    assert_eq!(KindScope::Either.kinds(), &[TableKind::Parameters, TableKind::Output]);
    assert_eq!(KindScope::Output.kinds(), &[TableKind::Output]);
  }
}
