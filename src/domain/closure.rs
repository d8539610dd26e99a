//! Pure building blocks of a daily closure: selection, aggregation and the
//! commit payload handed to a store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::distribution::Allocation;
use super::history::DailyRecord;
use super::id::WagerId;
use super::ledger::LedgerEntry;
use super::money::Money;
use super::wager::{Wager, WagerStatus};

/// How VOID wagers enter the day's totals.
///
/// VOID wagers are marked settled under every policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoidPolicy {
    /// Zero stake, zero profit, not counted.
    #[default]
    Exclude,
    /// Stake counted in turnover and wager count, profit zero.
    CountStake,
}

/// Turnover, gross profit and count of a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayTotals {
    pub turnover: Money,
    pub gross_profit: Money,
    pub wager_count: u32,
}

/// Wagers dated `date` that are resolved but not yet in the ledger.
#[must_use]
pub fn select_unsettled(wagers: &[Wager], date: NaiveDate) -> Vec<&Wager> {
    wagers
        .iter()
        .filter(|w| w.date == date && w.awaits_settlement())
        .collect()
}

/// Aggregate a selection under the given VOID policy.
#[must_use]
pub fn aggregate(selection: &[&Wager], policy: VoidPolicy) -> DayTotals {
    selection
        .iter()
        .fold(DayTotals::default(), |mut totals, wager| {
            if wager.status == WagerStatus::Void {
                if policy == VoidPolicy::CountStake {
                    totals.turnover += wager.stake;
                    totals.wager_count += 1;
                }
                return totals;
            }
            totals.turnover += wager.stake;
            totals.gross_profit += wager.profit.unwrap_or(Decimal::ZERO);
            totals.wager_count += 1;
            totals
        })
}

/// Everything one closure writes, applied atomically by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayClosure {
    pub record: DailyRecord,
    /// Wagers to flip to settled; each must still be unsettled at commit.
    pub wager_ids: Vec<WagerId>,
    /// Increments to apply to participant counters.
    pub allocations: Vec<Allocation>,
    pub entries: Vec<LedgerEntry>,
}

/// Unsettled wagers on a closure's date that the closure does not settle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeftBehind {
    pub pending: usize,
    pub resolved: usize,
}

impl DayClosure {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.record.date
    }

    /// Count wagers on this date that would stay unsettled after the commit.
    ///
    /// A closed day is frozen, so a store refuses the commit unless both
    /// counts are zero.
    #[must_use]
    pub fn left_behind<'a>(&self, wagers: impl IntoIterator<Item = &'a Wager>) -> LeftBehind {
        wagers
            .into_iter()
            .filter(|w| w.date == self.date() && !w.settled && !self.wager_ids.contains(&w.id))
            .fold(LeftBehind::default(), |mut left, w| {
                if w.is_resolved() {
                    left.resolved += 1;
                } else {
                    left.pending += 1;
                }
                left
            })
    }
}

/// Number of wagers dated `date` still awaiting an outcome.
#[must_use]
pub fn pending_on(wagers: &[Wager], date: NaiveDate) -> usize {
    wagers
        .iter()
        .filter(|w| w.date == date && !w.is_resolved())
        .count()
}
