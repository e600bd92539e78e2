//! Conversions between domain types and the loosely-typed AnyMemo columns.
//!
//! Text columns are nullable in databases written by other tools; NULL reads
//! back as an empty string. Dates are stored as `YYYY-MM-DD`.

use chrono::NaiveDate;
use terms_core::entry::{Entry, SchedulingRecord, StoredEntry};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `dict_tbl` row.
pub struct RawEntry {
  pub id:       i64,
  pub question: Option<String>,
  pub answer:   Option<String>,
  pub category: Option<String>,
}

impl RawEntry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:       row.get(0)?,
      question: row.get(1)?,
      answer:   row.get(2)?,
      category: row.get(3)?,
    })
  }

  pub fn into_stored(self) -> StoredEntry {
    StoredEntry {
      id:    self.id,
      entry: Entry {
        question: self.question.unwrap_or_default(),
        answer:   self.answer.unwrap_or_default(),
        category: self.category.unwrap_or_default(),
      },
    }
  }
}

/// Raw values read directly from a `learn_tbl` row.
pub struct RawSchedule {
  pub date_learn:           Option<String>,
  pub interval:             Option<i64>,
  pub grade:                Option<i64>,
  pub easiness:             Option<f64>,
  pub acq_reps:             Option<i64>,
  pub ret_reps:             Option<i64>,
  pub lapses:               Option<i64>,
  pub acq_reps_since_lapse: Option<i64>,
  pub ret_reps_since_lapse: Option<i64>,
}

impl RawSchedule {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      date_learn:           row.get(0)?,
      interval:             row.get(1)?,
      grade:                row.get(2)?,
      easiness:             row.get(3)?,
      acq_reps:             row.get(4)?,
      ret_reps:             row.get(5)?,
      lapses:               row.get(6)?,
      acq_reps_since_lapse: row.get(7)?,
      ret_reps_since_lapse: row.get(8)?,
    })
  }

  /// Missing values fall back to those of [`SchedulingRecord::initial`].
  pub fn into_schedule(self) -> Result<SchedulingRecord> {
    let initial = SchedulingRecord::initial();
    let date_learn = self
      .date_learn
      .as_deref()
      .map(decode_date)
      .transpose()?
      .unwrap_or(initial.date_learn);

    Ok(SchedulingRecord {
      date_learn,
      interval:             self.interval.unwrap_or(initial.interval),
      grade:                self.grade.unwrap_or(initial.grade),
      easiness:             self.easiness.unwrap_or(initial.easiness),
      acq_reps:             self.acq_reps.unwrap_or(initial.acq_reps),
      ret_reps:             self.ret_reps.unwrap_or(initial.ret_reps),
      lapses:               self.lapses.unwrap_or(initial.lapses),
      acq_reps_since_lapse: self.acq_reps_since_lapse.unwrap_or(initial.acq_reps_since_lapse),
      ret_reps_since_lapse: self.ret_reps_since_lapse.unwrap_or(initial.ret_reps_since_lapse),
    })
  }
}
