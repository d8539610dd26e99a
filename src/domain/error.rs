//! Domain validation errors for core domain types.
//!
//! These errors signal a broken invariant: structurally invalid calculator
//! input, an illegal wager transition, or a hedge without its anchor.
//! Ordinary infeasibility of a hedge request is *not* an error; see
//! [`Suggestion`](crate::domain::arbitrage::Suggestion).
//!
//! # Examples
//!
//! ```
//! use hedgepool::domain::arbitrage::suggest_hedge_from_anchor;
//! use hedgepool::domain::error::DomainError;
//! use rust_decimal_macros::dec;
//!
//! let result = suggest_hedge_from_anchor(dec!(1.0), dec!(100), dec!(10), dec!(0));
//! assert!(matches!(result, Err(DomainError::InvalidOdds { .. })));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::id::{GroupId, WagerId};
use super::wager::WagerStatus;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Decimal odds must be strictly greater than 1.
    #[error("odds must be greater than 1, got {odds}")]
    InvalidOdds {
        /// The invalid odds that were provided.
        odds: Decimal,
    },

    /// Odds or stake above the accepted bound.
    #[error("{field} {value} exceeds the maximum of {max}")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },

    /// Odds or stake so large that the profit math leaves the decimal range.
    #[error("{operation} overflows the decimal range")]
    Overflow { operation: &'static str },

    /// Stakes must be strictly positive.
    #[error("stake must be positive, got {stake}")]
    NonPositiveStake {
        /// The invalid stake that was provided.
        stake: Decimal,
    },

    /// Target profit percentage cannot be negative.
    #[error("target percentage cannot be negative, got {pct}")]
    NegativeTarget { pct: Decimal },

    /// Odds buffer cannot be negative.
    #[error("odds buffer cannot be negative, got {buffer}")]
    NegativeBuffer { buffer: Decimal },

    /// A terminal wager cannot be resolved a second time.
    #[error("wager {id} is already resolved as {status}")]
    AlreadyResolved { id: WagerId, status: WagerStatus },

    /// Resolution must move a wager into a terminal status.
    #[error("wager {id} cannot transition to {status}")]
    InvalidTransition { id: WagerId, status: WagerStatus },

    /// Odds and stake are frozen once a wager leaves PENDING.
    #[error("wager {id} is locked and can no longer be amended")]
    WagerLocked { id: WagerId },

    /// Wagers dated on a closed day are frozen.
    #[error("{date} is already closed; its wagers can no longer be added or changed")]
    DayClosed { date: NaiveDate },

    /// Every hedge must share its group with an anchor.
    #[error("hedge wager {wager} has no anchor in group {group}")]
    UnpairedHedge { wager: WagerId, group: GroupId },

    /// A group holds at most one anchor and one hedge.
    #[error("group {group} holds more than one {kind} wager")]
    DuplicateLeg { group: GroupId, kind: &'static str },

    /// Transfers must carry a non-zero amount with the sign of their kind.
    #[error("invalid transfer amount {amount} for {kind}")]
    InvalidTransfer { kind: &'static str, amount: Decimal },

    /// A withdrawal cannot exceed invested principal.
    #[error("withdrawal of {requested} exceeds principal {available}")]
    InsufficientPrincipal {
        requested: Decimal,
        available: Decimal,
    },
}
