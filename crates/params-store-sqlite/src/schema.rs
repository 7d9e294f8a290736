//! Live schema introspection and identifier validation.
//!
//! Table and column names cannot be bound as SQL parameters, so every name
//! that ends up interpolated into a statement is first checked against what
//! `sqlite_master` and `pragma_table_info` report. Lookups are not cached:
//! each check sees the schema as it is at call time.

use std::collections::BTreeSet;

use params_core::{KindScope, TableKind, ROWID};
use rusqlite::Connection;

use crate::Result;

/// Family names: the part of each table name before the first underscore.
pub fn families(conn: &Connection) -> Result<BTreeSet<String>> {
  let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
  let names = stmt
    .query_map([], |row| row.get::<_, String>(0))?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(
    names
      .iter()
      .filter_map(|name| name.split('_').next())
      .map(str::to_owned)
      .collect(),
  )
}

/// Declared column names of `table`; empty if the table does not exist.
pub fn columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
  let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
  let names = stmt
    .query_map([table], |row| row.get::<_, String>(0))?
    .collect::<rusqlite::Result<BTreeSet<_>>>()?;
  Ok(names)
}

/// Ensure `family` exists and every key is a column of the tables in
/// `scope`, or `rowid`.
pub fn check_identifiers<'a>(
  conn:   &Connection,
  family: &str,
  keys:   impl IntoIterator<Item = &'a str>,
  scope:  KindScope,
) -> Result<()> {
  let accepted_tables = families(conn)?;
  if !accepted_tables.contains(family) {
    return Err(
      params_core::Error::UnknownTable {
        table:    family.to_owned(),
        accepted: accepted_tables,
      }
      .into(),
    );
  }

  let mut accepted_keys = BTreeSet::from([ROWID.to_owned()]);
  for kind in scope.kinds() {
    accepted_keys.extend(columns(conn, &kind.table_name(family))?);
  }

  let unknown: Vec<String> = keys
    .into_iter()
    .filter(|key| !accepted_keys.contains(*key))
    .map(str::to_owned)
    .collect();

  if !unknown.is_empty() {
    return Err(
      params_core::Error::UnknownColumns {
        keys:     unknown,
        accepted: accepted_keys,
      }
      .into(),
    );
  }

  Ok(())
}

/// Which table of the output/parameters join a validated key belongs to.
///
/// `rowid` and output columns resolve to the output table so that the join
/// filters on output rows; anything else must be a parameters column.
pub fn join_side(key: &str, output_columns: &BTreeSet<String>) -> TableKind {
  if key == ROWID || output_columns.contains(key) {
    TableKind::Output
  } else {
    TableKind::Parameters
  }
}

/// Split a bootstrap script into statements.
///
/// Newlines are treated as spaces and statements are separated by `"; "`,
/// so each statement must end its line with a semicolon.
pub fn split_script(script: &str) -> Vec<String> {
  script
    .replace('\n', " ")
    .split("; ")
    .map(str::trim)
    .filter(|statement| !statement.is_empty())
    .map(str::to_owned)
    .collect()
}

/// Whether `statement` is a `PRAGMA`, in any letter case.
pub fn is_pragma(statement: &str) -> bool {
  statement
    .get(..6)
    .is_some_and(|keyword| keyword.eq_ignore_ascii_case("pragma"))
}
