//! Daily closure of resolved wagers into the participant ledger.
//!
//! - [`service`]: The [`Settlement`] orchestrator and its outcome type

pub mod service;

pub use service::{ClosureOutcome, Settlement};
