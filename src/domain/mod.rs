//! Pure domain logic: wagers, participants, fees, hedging and distribution.
//!
//! Nothing in this module performs I/O. Stores and the settlement
//! orchestrator build on top of it.

pub mod arbitrage;
pub mod closure;
pub mod distribution;
pub mod error;
pub mod fee;
pub mod history;
pub mod id;
pub mod ledger;
pub mod money;
pub mod participant;
pub mod wager;

pub use arbitrage::{
    compute_middle_profits, suggest_anchor_from_hedge, suggest_hedge_from_anchor, HedgeQuote,
    Infeasibility, MiddleProfits, Suggestion,
};
pub use closure::{DayClosure, DayTotals, LeftBehind, VoidPolicy};
pub use distribution::{distribute, Allocation, Distribution};
pub use error::DomainError;
pub use fee::{fee_rate, fee_tier_label, FEE_RATE_CAP};
pub use history::{DailyRecord, HistorySummary};
pub use id::{GroupId, ParticipantId, WagerId};
pub use ledger::{LedgerEntry, LedgerKind};
pub use money::{Money, Odds, Rate};
pub use participant::{CycleTotals, Participant, Role};
pub use wager::{pair_wagers, Wager, WagerKind, WagerPair, WagerStatus};
