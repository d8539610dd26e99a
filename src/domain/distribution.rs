//! Pro-rata distribution of a day's result across eligible participants.
//!
//! Each eligible participant receives `gross · principal / Σprincipal`.
//! Fees apply only to positive shares. No remainder reconciliation is
//! performed: the sum of shares equals the day's gross up to decimal
//! division rounding (see [`EPSILON`](super::money::EPSILON)).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::id::ParticipantId;
use super::ledger::{LedgerEntry, LedgerKind};
use super::money::{Money, Rate};
use super::participant::Participant;

/// One participant's share of a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub participant_id: ParticipantId,
    /// Fraction of the eligible principal held by this participant.
    pub share: Decimal,
    pub gross: Money,
    pub fee: Money,
    pub net: Money,
}

/// Result of a distribution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Input participants with eligible ones credited; order is preserved.
    pub participants: Vec<Participant>,
    pub allocations: Vec<Allocation>,
    /// PROFIT_PAYOUT and FEE entries to append.
    pub entries: Vec<LedgerEntry>,
    pub total_gross: Money,
    pub total_net: Money,
    pub total_fees: Money,
}

impl Distribution {
    fn unchanged(participants: &[Participant]) -> Self {
        Self {
            participants: participants.to_vec(),
            allocations: Vec::new(),
            entries: Vec::new(),
            total_gross: Decimal::ZERO,
            total_net: Decimal::ZERO,
            total_fees: Decimal::ZERO,
        }
    }

    /// Returns true if nobody was eligible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}

/// Split `daily_gross` over eligible participants in proportion to principal.
///
/// With no eligible participant, or zero eligible principal, the input is
/// returned unchanged with zero totals.
#[must_use]
pub fn distribute(
    participants: &[Participant],
    daily_gross: Money,
    fee_rate: Rate,
    date: NaiveDate,
) -> Distribution {
    let total_principal: Money = participants
        .iter()
        .filter(|p| p.is_eligible())
        .map(|p| p.principal)
        .sum();

    if total_principal <= Decimal::ZERO {
        return Distribution::unchanged(participants);
    }

    let mut result = Distribution::unchanged(participants);

    for participant in result.participants.iter_mut().filter(|p| p.is_eligible()) {
        let share = participant.principal / total_principal;
        // Multiplying first keeps the split exact; the share never overflows.
        let gross = daily_gross
            .checked_mul(participant.principal)
            .map_or_else(|| daily_gross * share, |scaled| scaled / total_principal);
        let fee = if gross > Decimal::ZERO {
            gross * fee_rate
        } else {
            Decimal::ZERO
        };
        let net = gross - fee;

        result.entries.push(LedgerEntry::new(
            participant.id.clone(),
            date,
            net,
            LedgerKind::ProfitPayout,
        ));
        if fee > Decimal::ZERO {
            result.entries.push(LedgerEntry::new(
                participant.id.clone(),
                date,
                -fee,
                LedgerKind::Fee,
            ));
        }

        participant.credit(gross, fee, net);

        result.total_gross += gross;
        result.total_fees += fee;
        result.total_net += net;
        result.allocations.push(Allocation {
            participant_id: participant.id.clone(),
            share,
            gross,
            fee,
            net,
        });
    }

    result
}
