//! Outbound ports implemented by storage adapters.

mod store;

pub use store::{HistoryStore, ParticipantStore, SettlementStore, Snapshot, WagerStore};
