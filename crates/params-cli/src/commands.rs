//! Subcommand implementations.

use std::{io::Write, path::Path};

use anyhow::{Context as _, bail};
use params_core::{CleanOutcome, Selector, TerminalPrompt, Value};
use params_store_sqlite::ParamsStore;
use serde::Serialize;

/// Parse `key=value` selector arguments, keeping their order.
pub fn parse_selector<S: AsRef<str>>(args: &[S]) -> anyhow::Result<Selector> {
  let mut selector = Selector::new();
  for arg in args {
    let arg = arg.as_ref();
    let Some((key, value)) = arg.split_once('=') else {
      bail!("selector {arg:?} is not of the form key=value");
    };
    if key.is_empty() {
      bail!("selector {arg:?} has an empty column name");
    }
    selector.insert(key, parse_value(value));
  }
  Ok(selector)
}

/// Integers, then floats, then `null`; anything else is text.
pub fn parse_value(raw: &str) -> Value {
  if let Ok(i) = raw.parse::<i64>() {
    Value::Integer(i)
  } else if let Ok(r) = raw.parse::<f64>()
    && r.is_finite()
  {
    Value::Real(r)
  } else if raw == "null" {
    Value::Null
  } else {
    Value::Text(raw.to_owned())
  }
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
  serde_json::to_writer_pretty(&mut *out, value).context("failed to serialise rows")?;
  writeln!(out)?;
  Ok(())
}

pub fn init(store: &mut ParamsStore, schema: &Path) -> anyhow::Result<()> {
  let count = store
    .execute_script(schema)
    .with_context(|| format!("failed to execute {}", schema.display()))?;
  tracing::info!("executed {count} statements from {}", schema.display());
  Ok(())
}

pub fn families(store: &ParamsStore, out: &mut impl Write) -> anyhow::Result<()> {
  for family in store.families()? {
    writeln!(out, "{family}")?;
  }
  Ok(())
}

pub fn param(
  store:    &ParamsStore,
  family:   &str,
  selector: &Selector,
  out:      &mut impl Write,
) -> anyhow::Result<()> {
  let lookup = store.get_param(family, selector)?;
  print_json(out, &lookup)
}

pub fn output(
  store:    &ParamsStore,
  family:   &str,
  selector: &Selector,
  out:      &mut impl Write,
) -> anyhow::Result<()> {
  let rows = store.get_output(family, selector)?;
  print_json(out, &rows)
}

pub fn clean(store: &mut ParamsStore, family: &str, selector: &Selector) -> anyhow::Result<()> {
  let mut prompt = TerminalPrompt::stdio();
  match store.clean_output(family, selector, &mut prompt)? {
    CleanOutcome::Declined => println!("Not deleting"),
    CleanOutcome::Deleted { files_removed, rows_deleted } => println!(
      "Deleted {rows_deleted} record(s) and {} file(s)",
      files_removed.len()
    ),
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_selector_keeps_order_and_types() {
    let selector = parse_selector(&["status=done", "alpha=1", "beta=0.5", "note=null"]).unwrap();
    assert_eq!(
      selector.iter().collect::<Vec<_>>(),
      [
        ("status", &Value::from("done")),
        ("alpha", &Value::Integer(1)),
        ("beta", &Value::Real(0.5)),
        ("note", &Value::Null),
      ]
    );
  }

  #[test]
  fn parse_selector_splits_on_first_equals() {
    let selector = parse_selector(&["file=out/a=b"]).unwrap();
    assert_eq!(selector.values().next(), Some(&Value::from("out/a=b")));
  }

  #[test]
  fn parse_selector_rejects_malformed() {
    assert!(parse_selector(&["alpha"]).is_err());
    assert!(parse_selector(&["=1"]).is_err());
  }

  #[test]
  fn non_finite_numbers_are_text() {
    assert_eq!(parse_value("inf"), Value::from("inf"));
    assert_eq!(parse_value("NaN"), Value::from("NaN"));
    assert_eq!(parse_value("-3"), Value::Integer(-3));
  }

  #[test]
  fn param_prints_single_row_as_object() {
    let mut store = ParamsStore::open_in_memory().unwrap();
    store
      .execute_sql("CREATE TABLE exp_parameters (alpha INTEGER);\nINSERT INTO exp_parameters VALUES (4);\n")
      .unwrap();

    let mut out = Vec::new();
    param(&store, "exp", &Selector::new(), &mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json, serde_json::json!({ "rowid": 1, "alpha": 4 }));

    let mut out = Vec::new();
    families(&store, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "exp\n");
  }
}
