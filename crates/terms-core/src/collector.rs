//! The entry collector.
//!
//! Drives one question → answer → category cycle per entry, consulting the
//! store and the [`ConflictPolicy`] at each step. Any rejected or empty step
//! restarts the cycle from the question. The session ends only when the
//! [`LineSource`] reports end-of-input or an interrupt; what happens to the
//! written entries then (commit or discard) is up to the caller.

use std::io;

use tracing::{debug, info};

use crate::{
  completion::CategoryCompleter,
  entry::{Entry, Field, SchedulingRecord},
  input::{Input, LineSource},
  policy::{ConflictPolicy, Decision, decide, is_affirmative},
  store::{Duplicates, EntryStore},
  Error, Result,
};

// ─── Public types ────────────────────────────────────────────────────────────

/// How a collection session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// Clean end of input; the caller should keep the `added` entries.
  EndOfInput { added: usize },
  /// The user aborted; the caller should discard the `added` entries.
  Interrupted { added: usize },
}

impl Outcome {
  pub fn added(&self) -> usize {
    match *self {
      Self::EndOfInput { added } | Self::Interrupted { added } => added,
    }
  }
}

/// Memory carried from one cycle to the next.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
  /// Offered as the default answer to the next category prompt.
  pub last_category: Option<String>,
}

// ─── Control flow ────────────────────────────────────────────────────────────

/// Why a cycle stopped before appending an entry, other than a restart.
enum Stop {
  Halt(Outcome),
  Failed(Error),
}

impl From<Error> for Stop {
  fn from(err: Error) -> Self { Self::Failed(err) }
}

impl From<io::Error> for Stop {
  fn from(err: io::Error) -> Self { Self::Failed(Error::Io(err)) }
}

// ─── Collector ───────────────────────────────────────────────────────────────

pub struct Collector<'a, S, L> {
  store:     &'a mut S,
  input:     &'a mut L,
  policy:    ConflictPolicy,
  state:     SessionState,
  completer: CategoryCompleter,
  added:     usize,
}

impl<'a, S: EntryStore, L: LineSource> Collector<'a, S, L> {
  /// Prepare a session. Completion candidates are loaded from `store` now.
  pub fn new(store: &'a mut S, input: &'a mut L, policy: ConflictPolicy) -> Result<Self> {
    let completer = CategoryCompleter::new(store.categories().map_err(Error::store)?);
    debug!(categories = completer.len(), ?policy, "collector ready");
    Ok(Self {
      store,
      input,
      policy,
      state: SessionState::default(),
      completer,
      added: 0,
    })
  }

  /// Collect entries until the input ends or is interrupted.
  pub fn run(mut self) -> Result<Outcome> {
    loop {
      match self.cycle() {
        Ok(()) => {}
        Err(Stop::Halt(outcome)) => return Ok(outcome),
        Err(Stop::Failed(err)) => return Err(err),
      }
    }
  }

  /// One full cycle. Returns `Ok(())` both after appending an entry and when
  /// a step asked for a restart.
  fn cycle(&mut self) -> Result<(), Stop> {
    let Some(question) = self.ask_text(Field::Question)? else {
      debug!("No question: looping back to start");
      return Ok(());
    };
    debug!("Got question '{question}'");

    let Some(answer) = self.ask_text(Field::Answer)? else {
      debug!("No answer: looping back to start");
      return Ok(());
    };
    debug!("Got answer '{answer}'");

    let Some(category) = self.ask_category()? else {
      debug!("No category: looping back to start");
      return Ok(());
    };
    debug!("Got category '{category}'");

    self.completer.insert(category.clone());
    self.state.last_category = Some(category.clone());

    let entry = Entry::new(question, answer, category);
    let id = self
      .store
      .append(&entry, &SchedulingRecord::initial())
      .map_err(Error::store)?;
    self.added += 1;

    info!(
      id,
      "New entry: '{}' -> '{}' (category '{}')",
      entry.question, entry.answer, entry.category
    );
    Ok(())
  }

  // ── Steps ─────────────────────────────────────────────────────────────────

  fn ask_text(&mut self, field: Field) -> Result<Option<String>, Stop> {
    let value = self.read(&format!("{}: ", field.label()), false)?;

    let duplicates = if value.is_empty() {
      Duplicates::default()
    } else {
      self
        .store
        .find_duplicates(field, &value)
        .map_err(Error::store)?
    };
    debug!("{} matches for {} '{value}'", duplicates.len(), field.label().to_lowercase());

    let decision = decide(!duplicates.is_empty(), &value, self.policy);
    let message = || {
      format!(
        "{} '{value}' seems to exist already, with {} '{}'. Proceed?",
        field.label(),
        field.paired().label().to_lowercase(),
        duplicates.first().unwrap_or_default(),
      )
    };
    let accepted = self.resolve(decision, message)?;
    Ok(accepted.then_some(value))
  }

  fn ask_category(&mut self) -> Result<Option<String>, Stop> {
    let prompt = match &self.state.last_category {
      Some(last) => format!("Category (default: {last}): "),
      None => "Category: ".to_owned(),
    };

    let mut category = self.read(&prompt, true)?;
    if category.is_empty()
      && let Some(last) = &self.state.last_category
    {
      category = last.clone();
    }

    let usage = if category.is_empty() {
      0
    } else {
      self
        .store
        .category_usage(&category)
        .map_err(Error::store)?
    };
    debug!("{usage} entries in category '{category}'");

    let decision = decide(usage == 0, &category, self.policy);
    let message = || format!("Category '{category}' does not seem to exist. Proceed?");
    let accepted = self.resolve(decision, message)?;
    Ok(accepted.then_some(category))
  }

  /// Turn a [`Decision`] into accept (`true`) or restart (`false`), asking
  /// the user when the decision is [`Decision::Confirm`].
  fn resolve(&mut self, decision: Decision, message: impl FnOnce() -> String) -> Result<bool, Stop> {
    match decision {
      Decision::Accept => Ok(true),
      Decision::Empty => Ok(false),
      Decision::Reject => {
        debug!(policy = ?self.policy, "conflicting value skipped");
        Ok(false)
      }
      Decision::Confirm => {
        let reply = self.read(&format!("{} [y/n] ", message()), false)?;
        Ok(is_affirmative(&reply))
      }
    }
  }

  /// Prompt for one line and trim it. End-of-input and interrupts stop the
  /// session.
  fn read(&mut self, prompt: &str, complete: bool) -> Result<String, Stop> {
    let completer = complete.then_some(&self.completer);
    match self.input.read_line(prompt, completer)? {
      Input::Line(line) => Ok(line.trim().to_owned()),
      Input::EndOfInput => Err(Stop::Halt(Outcome::EndOfInput { added: self.added })),
      Input::Interrupted => Err(Stop::Halt(Outcome::Interrupted { added: self.added })),
    }
  }
}
