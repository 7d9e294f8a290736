//! Tool configuration: optional TOML file, then `PARAMS_*` environment
//! variables, then command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "parameters.db";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ToolboxConfig {
  #[serde(default = "default_database")]
  pub database: PathBuf,
}

fn default_database() -> PathBuf { PathBuf::from(DEFAULT_DATABASE) }

impl Default for ToolboxConfig {
  fn default() -> Self { Self { database: default_database() } }
}

impl ToolboxConfig {
  /// Layer `file` (if it exists) under the `PARAMS` environment prefix.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("PARAMS"))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    let mut cfg: ToolboxConfig = settings
      .try_deserialize()
      .context("failed to deserialise ToolboxConfig")?;
    cfg.database = expand_tilde(&cfg.database);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
