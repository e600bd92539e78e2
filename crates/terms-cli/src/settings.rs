//! Layered configuration: optional TOML file, then `ADD_TERMS_*`
//! environment variables. Command-line flags are applied on top by `main`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use terms_core::policy::ConflictPolicy;

pub const ENV_PREFIX: &str = "ADD_TERMS";

/// Settings that can come from the config file or the environment.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
  /// Database to modify when `--database` is not given.
  pub database: Option<PathBuf>,
  /// Conflict policy when none of `--ask`, `--skip`, `--force` is given.
  pub policy:   Option<ConflictPolicy>,
}

impl Settings {
  pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
    Self::load_with(file, config::Environment::with_prefix(ENV_PREFIX))
  }

  fn load_with(file: Option<&Path>, env: config::Environment) -> anyhow::Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(path) = file {
      builder = builder.add_source(config::File::from(path.to_path_buf()));
    }

    builder
      .add_source(env)
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise configuration")
  }
}
