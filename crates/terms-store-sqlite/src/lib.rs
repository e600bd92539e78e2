//! SQLite backend for the study database.
//!
//! Reads and writes the AnyMemo layout: entries live in `dict_tbl`, and each
//! entry has a companion scheduling row in `learn_tbl`. All writes go through
//! a [`Session`], which wraps a single transaction.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{Session, SqliteStore};
