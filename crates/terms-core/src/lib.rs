//! Core types for interactive flashcard ingestion.
//!
//! This crate knows nothing about SQLite or terminals. The store backend
//! (`terms-store-sqlite`) implements [`store::EntryStore`], and the binary
//! (`terms-cli`) supplies a [`input::LineSource`] wired to the user's
//! terminal.

pub mod collector;
pub mod completion;
pub mod entry;
pub mod error;
pub mod input;
pub mod policy;
pub mod store;

pub use error::{Error, Result};
