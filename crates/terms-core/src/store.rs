//! The `EntryStore` trait and the duplicate-check result type.
//!
//! Implemented by storage backends (e.g. `terms-store-sqlite`). The
//! [`Collector`](crate::collector::Collector) only ever talks to this trait.

use crate::entry::{Entry, Field, SchedulingRecord};

/// Existing entries whose question (or answer) equals a candidate.
///
/// Holds the *paired* value of every match: the answers of matching
/// questions, or the questions of matching answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Duplicates {
  pub paired: Vec<String>,
}

impl Duplicates {
  pub fn is_empty(&self) -> bool { self.paired.is_empty() }

  pub fn len(&self) -> usize { self.paired.len() }

  /// The paired value of the first match, shown when asking for confirmation.
  pub fn first(&self) -> Option<&str> { self.paired.first().map(String::as_str) }
}

/// Abstraction over the study database.
///
/// Reads must observe writes made earlier through the same handle, so that
/// duplicates entered during one session are flagged as well.
pub trait EntryStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Entries whose trimmed `field` equals `value`.
  fn find_duplicates(&self, field: Field, value: &str) -> Result<Duplicates, Self::Error>;

  /// Number of entries filed under exactly `category`.
  fn category_usage(&self, category: &str) -> Result<u64, Self::Error>;

  /// Distinct non-empty categories, sorted.
  fn categories(&self) -> Result<Vec<String>, Self::Error>;

  /// Append an entry with its scheduling record; returns the new entry's id.
  fn append(&mut self, entry: &Entry, schedule: &SchedulingRecord) -> Result<i64, Self::Error>;
}
