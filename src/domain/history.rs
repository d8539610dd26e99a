//! Daily history records and period summaries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Write-once record of one daily closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Total stake of the settled wagers.
    pub turnover: Money,
    /// Sum of realized profit before fees.
    pub gross_profit: Money,
    pub wager_count: u32,
    pub bank_start: Money,
    pub bank_end: Money,
    /// Net profit actually credited to participants.
    pub net_distributed: Money,
    pub fees_collected: Money,
    pub notes: Option<String>,
}

/// Aggregate over a run of daily records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub days: u32,
    pub wagers: u32,
    pub turnover: Money,
    pub gross_profit: Money,
    pub net_distributed: Money,
    pub fees_collected: Money,
    pub winning_days: u32,
    pub losing_days: u32,
}

impl HistorySummary {
    /// Summarize records whose date falls in `[from, to]` (both optional).
    #[must_use]
    pub fn from_records(
        records: &[DailyRecord],
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        records
            .iter()
            .filter(|r| from.map_or(true, |f| r.date >= f))
            .filter(|r| to.map_or(true, |t| r.date <= t))
            .fold(Self::default(), |mut acc, r| {
                acc.days += 1;
                acc.wagers += r.wager_count;
                acc.turnover += r.turnover;
                acc.gross_profit += r.gross_profit;
                acc.net_distributed += r.net_distributed;
                acc.fees_collected += r.fees_collected;
                if r.gross_profit > Decimal::ZERO {
                    acc.winning_days += 1;
                } else if r.gross_profit < Decimal::ZERO {
                    acc.losing_days += 1;
                }
                acc
            })
    }

    /// Share of decided days that were profitable, as a percentage.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        let total = self.winning_days + self.losing_days;
        if total == 0 {
            None
        } else {
            Some(f64::from(self.winning_days) / f64::from(total) * 100.0)
        }
    }

    /// Gross profit over turnover.
    #[must_use]
    pub fn yield_rate(&self) -> Option<Decimal> {
        if self.turnover.is_zero() {
            None
        } else {
            Some(self.gross_profit / self.turnover)
        }
    }
}
