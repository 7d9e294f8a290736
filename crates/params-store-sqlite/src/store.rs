//! [`ParamsStore`] — validated access to parameters and output tables.

use std::{collections::BTreeSet, io, path::Path};

use params_core::{
  CleanOutcome, Confirm, FilterClause, KindScope, ParamLookup, Row, Selector, TableKind, Value,
};
use rusqlite::{Connection, params_from_iter};

use crate::{
  Error, Result, artifacts,
  encode::{decode_row, encode_params},
  schema,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Accessor over a single SQLite file holding `<family>_parameters` and
/// `<family>_output` tables.
///
/// The connection is owned exclusively and closed when the store is dropped.
pub struct ParamsStore {
  conn: Connection,
}

impl ParamsStore {
  /// Open (or create) the database at `path`.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path.as_ref())?;
    tracing::debug!("opened {}", path.as_ref().display());
    Ok(Self { conn })
  }

  /// Open an in-memory database — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Ok(Self { conn: Connection::open_in_memory()? })
  }

  /// Borrow the underlying connection, e.g. to insert rows.
  pub fn connection(&self) -> &Connection { &self.conn }

  // ── Schema ────────────────────────────────────────────────────────────────

  /// Run a bootstrap script (see [`ParamsStore::execute_sql`]).
  pub fn execute_script(&mut self, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let script = std::fs::read_to_string(path).map_err(|source| Error::Io {
      path: path.to_path_buf(),
      source,
    })?;
    self.execute_sql(&script)
  }

  /// Execute `"; "`-separated statements in order and commit once.
  ///
  /// Leading `PRAGMA` statements run before the transaction is opened, since
  /// some of them (`journal_mode`, `foreign_keys`) have no effect or fail
  /// inside one. Everything after them runs in a single transaction; a
  /// failing statement rolls that part back. Returns the number of
  /// statements executed.
  pub fn execute_sql(&mut self, script: &str) -> Result<usize> {
    let statements = schema::split_script(script);
    let split = statements
      .iter()
      .position(|statement| !schema::is_pragma(statement))
      .unwrap_or(statements.len());
    let (pragmas, body) = statements.split_at(split);

    for statement in pragmas {
      tracing::debug!(sql = %statement, "executing");
      self.conn.execute_batch(statement)?;
    }

    let tx = self.conn.transaction()?;
    for statement in body {
      tracing::debug!(sql = %statement, "executing");
      tx.execute_batch(statement)?;
    }
    tx.commit()?;
    Ok(statements.len())
  }

  /// Names of the table families present in the database.
  pub fn families(&self) -> Result<BTreeSet<String>> { schema::families(&self.conn) }

  /// Column names of one physical table of `family`.
  pub fn columns(&self, family: &str, kind: TableKind) -> Result<BTreeSet<String>> {
    self.check_identifiers(family, &Selector::new(), kind.into())?;
    schema::columns(&self.conn, &kind.table_name(family))
  }

  /// Fail unless `family` exists and every selector key is `rowid` or a
  /// column of the tables in `scope`.
  pub fn check_identifiers(
    &self,
    family:   &str,
    selector: &Selector,
    scope:    KindScope,
  ) -> Result<()> {
    schema::check_identifiers(&self.conn, family, selector.keys(), scope)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Select parameter rows matching `selector`.
  ///
  /// Exactly one match is returned as [`ParamLookup::One`]; zero or several
  /// as [`ParamLookup::Many`].
  pub fn get_param(&self, family: &str, selector: &Selector) -> Result<ParamLookup> {
    self.check_identifiers(family, selector, KindScope::Parameters)?;

    let filter = FilterClause::build(selector, None);
    let sql = format!(
      "SELECT rowid, * FROM {} {}",
      TableKind::Parameters.table_name(family),
      filter.sql
    );

    Ok(ParamLookup::from_rows(self.query_rows(&sql, &filter.params)?))
  }

  /// Select output rows joined with the parameter row each one references.
  ///
  /// The selector may name columns of either table. Always returns a list.
  pub fn get_output(&self, family: &str, selector: &Selector) -> Result<Vec<Row>> {
    self.check_identifiers(family, selector, KindScope::Either)?;

    let output = TableKind::Output.table_name(family);
    let parameters = TableKind::Parameters.table_name(family);
    let output_columns = schema::columns(&self.conn, &output)?;

    let filter = FilterClause::build_with(selector, |key| {
      Some(match schema::join_side(key, &output_columns) {
        TableKind::Output => output.clone(),
        TableKind::Parameters => parameters.clone(),
      })
    });

    let sql = format!(
      "SELECT {output}.rowid, * FROM {output} \
       INNER JOIN {parameters} ON {output}.{family}_id={parameters}.rowid {}",
      filter.sql
    );

    self.query_rows(&sql, &filter.params)
  }

  // ── Deletes ───────────────────────────────────────────────────────────────

  /// Delete output rows matching `selector` together with their artifact
  /// files, after `prompt` confirms.
  ///
  /// Files are removed before the rows, and the two steps are not atomic: a
  /// failure in between leaves rows whose files are already gone. The first
  /// file that cannot be removed aborts the whole operation.
  pub fn clean_output(
    &mut self,
    family:   &str,
    selector: &Selector,
    prompt:   &mut impl Confirm,
  ) -> Result<CleanOutcome> {
    self.clean_output_with(family, selector, prompt, |path| std::fs::remove_file(path))
  }

  /// [`ParamsStore::clean_output`] with a custom file removal function.
  pub(crate) fn clean_output_with<F>(
    &mut self,
    family:   &str,
    selector: &Selector,
    prompt:   &mut impl Confirm,
    mut remove: F,
  ) -> Result<CleanOutcome>
  where
    F: FnMut(&Path) -> io::Result<()>,
  {
    self.check_identifiers(family, selector, KindScope::Output)?;

    let filter = FilterClause::build(selector, None);
    let sql = format!(
      "DELETE FROM {} {}",
      TableKind::Output.table_name(family),
      filter.sql
    );

    let message = format!(
      "About to execute \"{sql}\" with {selector}\n\
       Are you sure you want to delete with output files (y or n)? "
    );
    if !prompt.confirm(&message).map_err(Error::Prompt)? {
      tracing::info!("not deleting");
      return Ok(CleanOutcome::Declined);
    }

    let mut files_removed = Vec::new();
    for row in self.get_output(family, selector)? {
      match row.get("file") {
        Some(Value::Text(prefix)) => {
          files_removed.extend(artifacts::remove_files(prefix, &mut remove)?);
        }
        Some(Value::Null) | None => {
          tracing::warn!(rowid = ?row.rowid(), "output row has no file, skipping");
        }
        Some(other) => {
          return Err(Error::FileColumn {
            rowid: row.rowid(),
            found: other.type_name(),
          });
        }
      }
    }

    tracing::info!("deleting table record");
    let tx = self.conn.transaction()?;
    let rows_deleted = tx.execute(&sql, params_from_iter(encode_params(&filter.params)))?;
    tx.commit()?;

    tracing::info!(
      files = files_removed.len(),
      rows = rows_deleted,
      "clean finished"
    );
    Ok(CleanOutcome::Deleted { files_removed, rows_deleted })
  }

  // ── Helpers ───────────────────────────────────────────────────────────────

  fn query_rows(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
    tracing::debug!(sql = %sql, params = params.len(), "query");

    let mut stmt = self.conn.prepare(sql)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();
    let rows = stmt
      .query_map(params_from_iter(encode_params(params)), |row| decode_row(&names, row))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }
}

impl Drop for ParamsStore {
  fn drop(&mut self) {
    tracing::info!("closing connection");
  }
}
