//! Entries and their companion scheduling records.
//!
//! Both are written once and never updated by this tool.

use chrono::NaiveDate;

// ─── Entry ───────────────────────────────────────────────────────────────────

/// A question/answer pair filed under a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
  pub question: String,
  pub answer:   String,
  pub category: String,
}

impl Entry {
  pub fn new(
    question: impl Into<String>,
    answer: impl Into<String>,
    category: impl Into<String>,
  ) -> Self {
    Self {
      question: question.into(),
      answer:   answer.into(),
      category: category.into(),
    }
  }
}

/// An [`Entry`] together with the identity the store assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
  pub id:    i64,
  pub entry: Entry,
}

/// The text column a duplicate check matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Question,
  Answer,
}

impl Field {
  /// The opposite field of the same entry.
  pub fn paired(self) -> Self {
    match self {
      Self::Question => Self::Answer,
      Self::Answer => Self::Question,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Question => "Question",
      Self::Answer => "Answer",
    }
  }
}

// ─── Scheduling ──────────────────────────────────────────────────────────────

/// Learning state stored alongside every entry.
///
/// New entries always start from [`SchedulingRecord::initial`]; the values
/// are the "never studied" baseline the study application expects.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingRecord {
  pub date_learn:           NaiveDate,
  pub interval:             i64,
  pub grade:                i64,
  pub easiness:             f64,
  pub acq_reps:             i64,
  pub ret_reps:             i64,
  pub lapses:               i64,
  pub acq_reps_since_lapse: i64,
  pub ret_reps_since_lapse: i64,
}

impl SchedulingRecord {
  pub const BASELINE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2010, 1, 1) {
    Some(d) => d,
    None => panic!("invalid baseline date"),
  };

  pub const INITIAL_EASINESS: f64 = 2.5;

  pub fn initial() -> Self {
    Self {
      date_learn:           Self::BASELINE_DATE,
      interval:             0,
      grade:                0,
      easiness:             Self::INITIAL_EASINESS,
      acq_reps:             0,
      ret_reps:             0,
      lapses:               0,
      acq_reps_since_lapse: 0,
      ret_reps_since_lapse: 0,
    }
  }
}

impl Default for SchedulingRecord {
  fn default() -> Self { Self::initial() }
}
