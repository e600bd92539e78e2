//! SQL schema for the study database.
//!
//! Matches the tables the study application creates itself. Existing
//! databases are never altered: every statement is `IF NOT EXISTS`, and no
//! pragmas are persisted.

/// DDL run once at connection startup.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS dict_tbl (
    _id      INTEGER PRIMARY KEY ASC AUTOINCREMENT,
    question TEXT,
    answer   TEXT,
    note     TEXT,
    category TEXT
);

-- One row per dict_tbl row, paired by insertion order.
CREATE TABLE IF NOT EXISTS learn_tbl (
    _id                  INTEGER PRIMARY KEY ASC AUTOINCREMENT,
    date_learn           TEXT,      -- YYYY-MM-DD
    interval             INTEGER,
    grade                INTEGER,
    easiness             REAL,
    acq_reps             INTEGER,
    ret_reps             INTEGER,
    lapses               INTEGER,
    acq_reps_since_lapse INTEGER,
    ret_reps_since_lapse INTEGER
);
";
