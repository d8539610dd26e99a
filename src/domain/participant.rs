//! Pool participants and their running profit counters.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::ParticipantId;
use super::ledger::{LedgerEntry, LedgerKind};
use super::money::Money;

/// What a participant does in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Holds principal and shares in daily results.
    Investor,
    /// Operates the pool; never receives distributions.
    Manager,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Investor => "INVESTOR",
            Self::Manager => "MANAGER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INVESTOR" => Ok(Self::Investor),
            "MANAGER" => Ok(Self::Manager),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Per-cycle cumulative counters.
///
/// Settlement only ever adds to these; resetting is an administrative
/// action ([`Participant::reset_cycle`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleTotals {
    pub gross: Money,
    pub fees: Money,
    pub net: Money,
}

/// A member of the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub role: Role,
    /// Invested principal; the pro-rata weight.
    pub principal: Money,
    /// Lifetime net profit earned.
    pub total_profit: Money,
    pub active: bool,
    pub cycle: CycleTotals,
}

impl Participant {
    /// Create an active participant with no principal yet.
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: ParticipantId::new(),
            name: name.into(),
            role,
            principal: Decimal::ZERO,
            total_profit: Decimal::ZERO,
            active: true,
            cycle: CycleTotals::default(),
        }
    }

    /// Set the invested principal.
    #[must_use]
    pub fn with_principal(mut self, principal: Money) -> Self {
        self.principal = principal;
        self
    }

    /// Set the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Active investors count towards the fee tier.
    #[must_use]
    pub fn is_active_investor(&self) -> bool {
        self.role == Role::Investor && self.active
    }

    /// Whether this participant takes part in a distribution.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.is_active_investor() && self.principal > Decimal::ZERO
    }

    /// Capital attributed to this participant: principal plus earned profit.
    #[must_use]
    pub fn capital(&self) -> Money {
        self.principal + self.total_profit
    }

    /// Add one day's share to the running counters.
    pub fn credit(&mut self, gross: Money, fee: Money, net: Money) {
        self.cycle.gross += gross;
        self.cycle.fees += fee;
        self.cycle.net += net;
        self.total_profit += net;
    }

    /// Apply an approved deposit or withdrawal to principal.
    ///
    /// Deposits carry a positive amount, withdrawals a negative one.
    ///
    /// # Errors
    ///
    /// Rejects other ledger kinds, amounts with the wrong sign, and
    /// withdrawals larger than the current principal.
    pub fn apply_transfer(&mut self, entry: &LedgerEntry) -> Result<(), DomainError> {
        let amount = entry.amount;
        match entry.kind {
            LedgerKind::Deposit if amount > Decimal::ZERO => {}
            LedgerKind::Withdrawal if amount < Decimal::ZERO => {
                if -amount > self.principal {
                    return Err(DomainError::InsufficientPrincipal {
                        requested: -amount,
                        available: self.principal,
                    });
                }
            }
            kind => {
                return Err(DomainError::InvalidTransfer {
                    kind: kind.as_str(),
                    amount,
                })
            }
        }
        self.principal = self
            .principal
            .checked_add(amount)
            .ok_or(DomainError::Overflow { operation: "deposit" })?;
        Ok(())
    }

    /// Zero the per-cycle counters. Lifetime profit is kept.
    pub fn reset_cycle(&mut self) {
        self.cycle = CycleTotals::default();
    }
}
