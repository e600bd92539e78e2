//! [`SqliteStore`] and [`Session`], the SQLite implementation of
//! [`EntryStore`].

use std::path::Path;

use rusqlite::{Connection, Transaction};
use terms_core::{
  entry::{Entry, Field, SchedulingRecord, StoredEntry},
  store::{Duplicates, EntryStore},
};
use tracing::debug;

use crate::{
  encode::{encode_date, RawEntry, RawSchedule},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A study database backed by a single SQLite file.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) a database at `path` and make sure its tables exist.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path)?;
    let store = Self { conn };
    store.init_schema()?;
    Ok(store)
  }

  /// Open an in-memory database, for tests.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    let store = Self { conn };
    store.init_schema()?;
    Ok(store)
  }

  fn init_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA)?;
    Ok(())
  }

  /// Begin a write session. Nothing written through it is visible to other
  /// connections until [`Session::commit`].
  pub fn session(&mut self) -> Result<Session<'_>> {
    let tx = self.conn.transaction()?;
    debug!("session transaction started");
    Ok(Session { tx, added: 0 })
  }

  /// All entries, in id order.
  pub fn entries(&self) -> Result<Vec<StoredEntry>> { list_entries(&self.conn) }

  /// All scheduling records, in id order.
  pub fn scheduling_records(&self) -> Result<Vec<SchedulingRecord>> {
    list_schedules(&self.conn)
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// A transaction over the study database.
///
/// Dropping a session without calling [`commit`](Session::commit) rolls back
/// everything written through it.
pub struct Session<'c> {
  tx:    Transaction<'c>,
  added: usize,
}

impl Session<'_> {
  /// Number of entries appended so far.
  pub fn added(&self) -> usize { self.added }

  /// Make every write durable. Returns the number of entries appended.
  pub fn commit(self) -> Result<usize> {
    let added = self.added;
    self.tx.commit()?;
    debug!(added, "session committed");
    Ok(added)
  }

  /// Roll back every write made through this session.
  pub fn discard(self) -> Result<()> {
    let added = self.added;
    self.tx.rollback()?;
    debug!(added, "session rolled back");
    Ok(())
  }
}

impl EntryStore for Session<'_> {
  type Error = crate::Error;

  fn find_duplicates(&self, field: Field, value: &str) -> Result<Duplicates> {
    let sql = match field {
      Field::Question => "SELECT answer FROM dict_tbl WHERE trim(question) = ?1 ORDER BY _id",
      Field::Answer => "SELECT question FROM dict_tbl WHERE trim(answer) = ?1 ORDER BY _id",
    };

    let mut stmt = self.tx.prepare_cached(sql)?;
    let paired = stmt
      .query_map(rusqlite::params![value], |row| row.get::<_, Option<String>>(0))?
      .map(|r| r.map(Option::unwrap_or_default))
      .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Duplicates { paired })
  }

  fn category_usage(&self, category: &str) -> Result<u64> {
    let count: i64 = self.tx.query_row(
      "SELECT count(*) FROM dict_tbl WHERE category = ?1",
      rusqlite::params![category],
      |row| row.get(0),
    )?;
    Ok(count.max(0) as u64)
  }

  fn categories(&self) -> Result<Vec<String>> {
    let mut stmt = self.tx.prepare(
      "SELECT DISTINCT category FROM dict_tbl
       WHERE category IS NOT NULL AND category != ''
       ORDER BY category",
    )?;
    let rows = stmt
      .query_map([], |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(rows)
  }

  fn append(&mut self, entry: &Entry, schedule: &SchedulingRecord) -> Result<i64> {
    self.tx.execute(
      "INSERT INTO dict_tbl (question, answer, category) VALUES (?1, ?2, ?3)",
      rusqlite::params![entry.question, entry.answer, entry.category],
    )?;
    let id = self.tx.last_insert_rowid();

    self.tx.execute(
      "INSERT INTO learn_tbl (
         date_learn, interval, grade, easiness,
         acq_reps, ret_reps, lapses,
         acq_reps_since_lapse, ret_reps_since_lapse
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
      rusqlite::params![
        encode_date(schedule.date_learn),
        schedule.interval,
        schedule.grade,
        schedule.easiness,
        schedule.acq_reps,
        schedule.ret_reps,
        schedule.lapses,
        schedule.acq_reps_since_lapse,
        schedule.ret_reps_since_lapse,
      ],
    )?;

    self.added += 1;
    Ok(id)
  }
}

// ─── Reads ───────────────────────────────────────────────────────────────────

fn list_entries(conn: &Connection) -> Result<Vec<StoredEntry>> {
  let mut stmt =
    conn.prepare("SELECT _id, question, answer, category FROM dict_tbl ORDER BY _id")?;
  let raws = stmt
    .query_map([], RawEntry::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(raws.into_iter().map(RawEntry::into_stored).collect())
}

fn list_schedules(conn: &Connection) -> Result<Vec<SchedulingRecord>> {
  let mut stmt = conn.prepare(
    "SELECT date_learn, interval, grade, easiness,
            acq_reps, ret_reps, lapses,
            acq_reps_since_lapse, ret_reps_since_lapse
     FROM learn_tbl ORDER BY _id",
  )?;
  let raws = stmt
    .query_map([], RawSchedule::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawSchedule::into_schedule).collect()
}
