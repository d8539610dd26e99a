//! Append-only participant ledger entries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::ParticipantId;
use super::money::Money;

/// Kind of a ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerKind {
    Deposit,
    Withdrawal,
    /// Net share of a day's result; may be negative.
    ProfitPayout,
    /// Platform fee on a positive share; always negative.
    Fee,
}

impl LedgerKind {
    /// Stable upper-case name used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdrawal => "WITHDRAWAL",
            Self::ProfitPayout => "PROFIT_PAYOUT",
            Self::Fee => "FEE",
        }
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(Self::Deposit),
            "WITHDRAWAL" => Ok(Self::Withdrawal),
            "PROFIT_PAYOUT" => Ok(Self::ProfitPayout),
            "FEE" => Ok(Self::Fee),
            other => Err(format!("unknown ledger kind '{other}'")),
        }
    }
}

/// One signed movement on a participant's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub participant_id: ParticipantId,
    pub date: NaiveDate,
    pub amount: Money,
    pub kind: LedgerKind,
}

impl LedgerEntry {
    #[must_use]
    pub fn new(participant_id: ParticipantId, date: NaiveDate, amount: Money, kind: LedgerKind) -> Self {
        Self {
            participant_id,
            date,
            amount,
            kind,
        }
    }
}
