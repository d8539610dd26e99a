//! Hedgepool - settlement engine for a pooled wagering fund.
//!
//! Investors contribute principal to a shared bank; a manager places
//! wagers on behalf of the pool, often as an anchor plus a hedge on the
//! opposing outcome. At the end of each day the realized profit of that
//! day's resolved wagers is split across investors in proportion to their
//! principal, a tiered management fee is withheld, and every movement is
//! recorded in an append-only ledger.
//!
//! # Architecture
//!
//! - [`domain`] - Pure logic: wagers and pairing, the fee schedule, hedge
//!   calculators, pro-rata distribution, daily records
//! - [`port`] - Store traits the application depends on
//! - [`application`] - The daily closure orchestrator and the hedge advisor
//! - [`adapter`] - The `hedgepool` CLI, plus in-memory and SQLite stores
//! - [`infrastructure`] - TOML configuration and logging setup
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Expose fixture builders for integration tests
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use hedgepool::adapter::outbound::memory::MemoryStore;
//! use hedgepool::application::settlement::Settlement;
//! use hedgepool::domain::{GroupId, Participant, Role, Wager, WagerKind, WagerStatus};
//! use hedgepool::port::outbound::{ParticipantStore, WagerStore};
//! use rust_decimal_macros::dec;
//!
//! let store = Arc::new(MemoryStore::new());
//! let alice = Participant::new("alice", Role::Investor).with_principal(dec!(1000));
//! store.save_participant(&alice).unwrap();
//!
//! let day = chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
//! let mut wager =
//!     Wager::try_new(GroupId::new(), WagerKind::Anchor, dec!(2.0), dec!(50), day, chrono::Utc::now())
//!         .unwrap();
//! wager.resolve(WagerStatus::Won).unwrap();
//! store.save_wager(&wager).unwrap();
//!
//! let outcome = Settlement::new(store).close_day(day).unwrap();
//! assert!(outcome.is_settled());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
