//! `add-terms`: add flashcards to a study database from the terminal.
//!
//! Reads question, answer and category for each new entry, warning about
//! questions or answers that already exist and about unknown categories.
//!
//! # Usage
//!
//! ```text
//! add-terms --database deck.db
//! add-terms -d deck.db --skip < terms.txt
//! ```

mod settings;
mod terminal;

use std::{
  io::{self, IsTerminal as _, Write as _},
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{CommandFactory as _, Parser};
use settings::Settings;
use terminal::TerminalSource;
use terms_core::{
  collector::{Collector, Outcome},
  input::{LineSource, ReaderSource},
  policy::ConflictPolicy,
};
use terms_store_sqlite::SqliteStore;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

const DEFAULT_DATABASE: &str = "germanpod.xml.db";

const BANNER: &str = "
Press Ctrl+D at any time to exit saving changes, or Ctrl+C to exit
without saving changes.
";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "add-terms",
  version,
  about = "Add questions and answers to a study database, reading entries from standard input"
)]
struct Cli {
  /// SQLite database to modify (germanpod.xml.db by default).
  #[arg(short, long, value_name = "FILE")]
  database: Option<PathBuf>,

  /// Ask before adding a question or answer that exists, or an unknown
  /// category (default).
  #[arg(short, long, overrides_with_all = ["ask", "skip", "force"])]
  ask: bool,

  /// Skip entries whose question or answer exists, or whose category is
  /// unknown, without asking.
  #[arg(short, long, overrides_with_all = ["ask", "skip", "force"])]
  skip: bool,

  /// Add new entries without confirmation even if the questions and/or
  /// answers exist.
  #[arg(short, long, overrides_with_all = ["ask", "skip", "force"])]
  force: bool,

  /// Print debugging information.
  #[arg(short, long)]
  verbose: bool,

  /// TOML file with `database` and `policy` defaults.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Positional arguments are not accepted.
  #[arg(hide = true)]
  extra: Vec<String>,
}

impl Cli {
  /// The policy chosen on the command line; the last flag given wins.
  fn policy(&self) -> Option<ConflictPolicy> {
    if self.force {
      Some(ConflictPolicy::Add)
    } else if self.skip {
      Some(ConflictPolicy::Skip)
    } else if self.ask {
      Some(ConflictPolicy::Ask)
    } else {
      None
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let cli = Cli::parse();

  if let Some(code) = usage_error(&cli, &mut io::stdout()) {
    std::process::exit(code);
  }

  let default_level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  // CLI flags override the environment, which overrides the config file.
  let settings = Settings::load(cli.config.as_deref())?;
  let policy = cli.policy().or(settings.policy).unwrap_or_default();
  let database = cli
    .database
    .or(settings.database)
    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));
  let database = std::path::absolute(expand_tilde(&database))
    .with_context(|| format!("failed to resolve database path {}", database.display()))?;

  let mut store = SqliteStore::open(&database)
    .with_context(|| format!("failed to open database {}", database.display()))?;
  info!("Opened database '{}'", database.display());

  // A signal can arrive outside the line editor (piped input, or between
  // prompts). The open transaction is never committed, so SQLite drops it.
  ctrlc::set_handler(|| {
    terminal::restore();
    info!("Exiting without saving changes...");
    info!("Exiting...");
    std::process::exit(0);
  })
  .context("failed to install interrupt handler")?;

  println!("{BANNER}");

  let result = if io::stdin().is_terminal() {
    ask_for_entries(&mut store, policy, &mut TerminalSource::new())
  } else {
    let mut source = ReaderSource::new(io::stdin().lock(), io::stdout().lock());
    ask_for_entries(&mut store, policy, &mut source)
  };

  info!("Exiting...");
  result
}

/// Print the usage help and return the exit code when positional arguments
/// were given.
fn usage_error(cli: &Cli, out: &mut impl io::Write) -> Option<i32> {
  if cli.extra.is_empty() {
    return None;
  }
  write!(out, "{}", Cli::command().render_help()).ok();
  Some(1)
}

/// Run one collection session and commit or discard it.
fn ask_for_entries<L: LineSource>(
  store: &mut SqliteStore,
  policy: ConflictPolicy,
  input: &mut L,
) -> Result<()> {
  let mut session = store.session().context("failed to start session")?;
  let outcome = Collector::new(&mut session, input, policy)?.run()?;

  match outcome {
    Outcome::EndOfInput { added } => {
      info!("Saving changes...");
      session.commit().context("failed to save changes")?;
      info!(added, "Saved {added} new entries");
    }
    Outcome::Interrupted { added } => {
      info!("Exiting without saving changes...");
      session.discard().context("failed to discard changes")?;
      info!(added, "Discarded {added} new entries");
    }
  }
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
