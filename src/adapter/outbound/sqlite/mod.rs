//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed store for wagers, participants, the ledger
//! and daily history using Diesel ORM.

pub mod database;
pub mod store;

pub use store::SqliteStore;
