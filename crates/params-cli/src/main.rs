//! `params-toolbox` — query and clean a parameters/output database.
//!
//! # Usage
//!
//! ```text
//! params-toolbox init schema.sql
//! params-toolbox param experiment alpha=1
//! params-toolbox output experiment status=done
//! params-toolbox clean experiment status=done
//! ```
//!
//! The database path comes from `--database`, else `PARAMS_DATABASE`, else
//! `database` in the config file, else `parameters.db`.

mod commands;
mod settings;

use std::{io, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use params_store_sqlite::ParamsStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ToolboxConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage a parameters/output SQLite database")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "params.toml")]
  config: PathBuf,

  /// Database file; overrides the configuration.
  #[arg(short, long, value_name = "FILE")]
  database: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Execute a file of SQL statements, e.g. to create the tables.
  Init {
    schema: PathBuf,
  },
  /// List the table families in the database.
  Families,
  /// Print parameter rows matching the selectors as JSON.
  Param {
    family:    String,
    /// `column=value` conditions, all of which must hold.
    selectors: Vec<String>,
  },
  /// Print output rows, joined with their parameters, as JSON.
  Output {
    family:    String,
    selectors: Vec<String>,
  },
  /// Delete output rows and their artifact files, after confirmation.
  Clean {
    family:    String,
    selectors: Vec<String>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  // Logs go to stderr; stdout carries command output.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  let mut cfg = ToolboxConfig::load(&cli.config)?;
  if let Some(database) = cli.database {
    cfg.database = settings::expand_tilde(&database);
  }

  let mut store = ParamsStore::open(&cfg.database)
    .with_context(|| format!("failed to open database at {:?}", cfg.database))?;

  let stdout = io::stdout();
  let mut out = stdout.lock();

  match cli.command {
    Command::Init { schema } => commands::init(&mut store, &schema),
    Command::Families => commands::families(&store, &mut out),
    Command::Param { family, selectors } => {
      let selector = commands::parse_selector(&selectors)?;
      commands::param(&store, &family, &selector, &mut out)
    }
    Command::Output { family, selectors } => {
      let selector = commands::parse_selector(&selectors)?;
      commands::output(&store, &family, &selector, &mut out)
    }
    Command::Clean { family, selectors } => {
      drop(out);
      let selector = commands::parse_selector(&selectors)?;
      commands::clean(&mut store, &family, &selector)
    }
  }
}
