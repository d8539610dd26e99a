//! Hedge advice for wagers in the book.
//!
//! Wraps the pure calculators with the operator's configured defaults and
//! the pairing rules of the wager book.

use rust_decimal::Decimal;

use crate::domain::arbitrage::{suggest_anchor_from_hedge, suggest_hedge_from_anchor, Suggestion};
use crate::domain::error::DomainError;
use crate::domain::money::{Money, Odds};
use crate::domain::wager::{Wager, WagerKind};

/// Odds buffers offered to the operator by default.
pub const DEFAULT_BUFFER_PRESETS: [Decimal; 4] = [
    Decimal::ZERO,
    Decimal::from_parts(3, 0, 0, false, 2),
    Decimal::from_parts(5, 0, 0, false, 2),
    Decimal::from_parts(10, 0, 0, false, 2),
];

/// Defaults applied when a request does not override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorDefaults {
    /// Target profit as a percentage of the known stake.
    pub target_pct: Decimal,
    pub odds_buffer: Decimal,
    pub buffer_presets: Vec<Decimal>,
}

impl Default for AdvisorDefaults {
    fn default() -> Self {
        Self {
            target_pct: Decimal::TEN,
            odds_buffer: Decimal::ZERO,
            buffer_presets: DEFAULT_BUFFER_PRESETS.to_vec(),
        }
    }
}

/// Suggestion computed at one odds buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferedSuggestion {
    pub buffer: Decimal,
    pub suggestion: Suggestion,
}

/// Hedge advisor.
#[derive(Debug, Clone, Default)]
pub struct Advisor {
    defaults: AdvisorDefaults,
}

impl Advisor {
    #[must_use]
    pub const fn new(defaults: AdvisorDefaults) -> Self {
        Self { defaults }
    }

    #[must_use]
    pub const fn defaults(&self) -> &AdvisorDefaults {
        &self.defaults
    }

    /// Solve for a hedge, filling unset parameters from the defaults.
    ///
    /// # Errors
    ///
    /// Propagates invalid-input errors from the calculator.
    pub fn hedge(
        &self,
        odds: Odds,
        stake: Money,
        target_pct: Option<Decimal>,
        buffer: Option<Decimal>,
    ) -> Result<Suggestion, DomainError> {
        suggest_hedge_from_anchor(
            odds,
            stake,
            target_pct.unwrap_or(self.defaults.target_pct),
            buffer.unwrap_or(self.defaults.odds_buffer),
        )
    }

    /// Solve for an anchor, filling unset parameters from the defaults.
    ///
    /// # Errors
    ///
    /// Propagates invalid-input errors from the calculator.
    pub fn anchor(
        &self,
        odds: Odds,
        stake: Money,
        target_pct: Option<Decimal>,
        buffer: Option<Decimal>,
    ) -> Result<Suggestion, DomainError> {
        suggest_anchor_from_hedge(
            odds,
            stake,
            target_pct.unwrap_or(self.defaults.target_pct),
            buffer.unwrap_or(self.defaults.odds_buffer),
        )
    }

    /// Hedge suggestions for every configured buffer preset.
    ///
    /// # Errors
    ///
    /// Propagates invalid-input errors from the calculator.
    pub fn hedge_presets(
        &self,
        odds: Odds,
        stake: Money,
        target_pct: Option<Decimal>,
    ) -> Result<Vec<BufferedSuggestion>, DomainError> {
        self.defaults
            .buffer_presets
            .iter()
            .map(|&buffer| {
                self.hedge(odds, stake, target_pct, Some(buffer))
                    .map(|suggestion| BufferedSuggestion { buffer, suggestion })
            })
            .collect()
    }

    /// Suggest the missing leg for a wager already in the book.
    ///
    /// Anchors get a hedge suggestion, hedges an anchor suggestion.
    ///
    /// # Errors
    ///
    /// Propagates invalid-input errors from the calculator.
    pub fn complement(&self, wager: &Wager, target_pct: Option<Decimal>) -> Result<Suggestion, DomainError> {
        match wager.kind {
            WagerKind::Anchor => self.hedge(wager.odds, wager.stake, target_pct, None),
            WagerKind::Hedge => self.anchor(wager.odds, wager.stake, target_pct, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::GroupId;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_match_documented_presets() {
        let d = AdvisorDefaults::default();
        assert_eq!(d.target_pct, dec!(10));
        assert_eq!(d.buffer_presets, vec![dec!(0), dec!(0.03), dec!(0.05), dec!(0.10)]);
    }

    #[test]
    fn hedge_uses_defaults_when_unset() {
        let advisor = Advisor::default();
        let s = advisor.hedge(dec!(2.10), dec!(100), None, None).unwrap();
        assert_eq!(s.quote().unwrap().target, dec!(10));
    }

    #[test]
    fn presets_produce_increasing_odds() {
        let advisor = Advisor::default();
        let list = advisor.hedge_presets(dec!(2.5), dec!(100), Some(dec!(20))).unwrap();
        assert_eq!(list.len(), 4);
        let odds: Vec<_> = list.iter().map(|b| b.suggestion.quote().unwrap().odds).collect();
        assert!(odds.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn complement_follows_wager_kind() {
        let advisor = Advisor::default();
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let hedge = Wager::try_new(GroupId::new(), WagerKind::Hedge, dec!(2.0), dec!(100), date, Utc::now())
            .unwrap();
        let q = *advisor.complement(&hedge, None).unwrap().quote().unwrap();
        // Anchor stake solved from the hedge: 100 * (2.0 - 1 - 0.10).
        assert_eq!(q.stake, dec!(90));
    }
}
