//! Wagers, their outcome lifecycle and anchor/hedge pairing.
//!
//! A wager starts PENDING, moves exactly once to a terminal status (which
//! fixes its realized profit) and is later folded into the ledger by a
//! daily closure. Anchors and hedges sharing a [`GroupId`] form a
//! [`WagerPair`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::arbitrage::{compute_middle_profits, MiddleProfits};
use super::error::DomainError;
use super::id::{GroupId, WagerId};
use super::money::{Money, Odds};

/// Role of a wager inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WagerKind {
    /// The first-placed leg, taken for its expected value.
    Anchor,
    /// The protecting leg placed against the anchor.
    Hedge,
}

impl WagerKind {
    /// Stable upper-case name used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anchor => "ANCHOR",
            Self::Hedge => "HEDGE",
        }
    }
}

impl fmt::Display for WagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WagerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ANCHOR" => Ok(Self::Anchor),
            "HEDGE" => Ok(Self::Hedge),
            other => Err(format!("unknown wager kind '{other}'")),
        }
    }
}

/// Outcome status of a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WagerStatus {
    Pending,
    Won,
    HalfWon,
    Lost,
    HalfLost,
    /// Stake returned, no gain or loss.
    Void,
}

impl WagerStatus {
    /// Stable upper-case name used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Won => "WON",
            Self::HalfWon => "HALF_WON",
            Self::Lost => "LOST",
            Self::HalfLost => "HALF_LOST",
            Self::Void => "VOID",
        }
    }

    /// Returns true for every status except PENDING.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Realized profit of a stake at the given odds under this status.
    ///
    /// Returns `Ok(None)` for PENDING, which has no realized profit yet.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Overflow`] if the gain leaves the decimal range.
    pub fn profit_for(&self, odds: Odds, stake: Money) -> Result<Option<Money>, DomainError> {
        let gain = || {
            (odds - Decimal::ONE)
                .checked_mul(stake)
                .ok_or(DomainError::Overflow { operation: "multiplication" })
        };
        Ok(match self {
            Self::Pending => None,
            Self::Won => Some(gain()?),
            Self::HalfWon => Some(gain()? / Decimal::TWO),
            Self::Lost => Some(-stake),
            Self::HalfLost => Some(-stake / Decimal::TWO),
            Self::Void => Some(Decimal::ZERO),
        })
    }
}

impl fmt::Display for WagerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WagerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "PENDING" => Ok(Self::Pending),
            "WON" => Ok(Self::Won),
            "HALF_WON" => Ok(Self::HalfWon),
            "LOST" => Ok(Self::Lost),
            "HALF_LOST" => Ok(Self::HalfLost),
            "VOID" => Ok(Self::Void),
            other => Err(format!("unknown wager status '{other}'")),
        }
    }
}

/// Largest decimal odds a leg may carry.
pub const MAX_ODDS: Odds = dec!(10000);

/// Largest stake a single leg may carry.
pub const MAX_STAKE: Money = dec!(1000000000000);

/// Check that odds and stake describe a placeable wager.
///
/// # Errors
///
/// Returns [`DomainError::InvalidOdds`] for odds ≤ 1,
/// [`DomainError::NonPositiveStake`] for stake ≤ 0 and
/// [`DomainError::OutOfRange`] above [`MAX_ODDS`] or [`MAX_STAKE`].
pub fn validate_leg(odds: Odds, stake: Money) -> Result<(), DomainError> {
    if odds <= Decimal::ONE {
        return Err(DomainError::InvalidOdds { odds });
    }
    if stake <= Decimal::ZERO {
        return Err(DomainError::NonPositiveStake { stake });
    }
    if odds > MAX_ODDS {
        return Err(DomainError::OutOfRange {
            field: "odds",
            value: odds,
            max: MAX_ODDS,
        });
    }
    if stake > MAX_STAKE {
        return Err(DomainError::OutOfRange {
            field: "stake",
            value: stake,
            max: MAX_STAKE,
        });
    }
    Ok(())
}

/// A single wager placed on behalf of the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wager {
    pub id: WagerId,
    pub group_id: GroupId,
    pub kind: WagerKind,
    pub odds: Odds,
    pub stake: Money,
    pub status: WagerStatus,
    /// Day the wager is settled into the ledger.
    pub date: NaiveDate,
    pub event_at: DateTime<Utc>,
    /// Realized profit; `None` until resolved.
    pub profit: Option<Money>,
    /// Set once a daily closure has folded this wager into the ledger.
    pub settled: bool,
    pub notes: String,
}

impl Wager {
    /// Create a new pending wager.
    ///
    /// # Errors
    ///
    /// Returns an error if odds or stake are invalid (see [`validate_leg`]).
    pub fn try_new(
        group_id: GroupId,
        kind: WagerKind,
        odds: Odds,
        stake: Money,
        date: NaiveDate,
        event_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_leg(odds, stake)?;
        Ok(Self {
            id: WagerId::new(),
            group_id,
            kind,
            odds,
            stake,
            status: WagerStatus::Pending,
            date,
            event_at,
            profit: None,
            settled: false,
            notes: String::new(),
        })
    }

    /// Attach free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Returns true if the wager has reached a terminal status.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns true if the wager is resolved but not yet in the ledger.
    #[must_use]
    pub const fn awaits_settlement(&self) -> bool {
        self.is_resolved() && !self.settled
    }

    /// Move the wager from PENDING to a terminal status, fixing its profit.
    ///
    /// # Errors
    ///
    /// Fails if the wager was already resolved or if `status` is PENDING.
    pub fn resolve(&mut self, status: WagerStatus) -> Result<Money, DomainError> {
        if self.is_resolved() {
            return Err(DomainError::AlreadyResolved {
                id: self.id.clone(),
                status: self.status,
            });
        }
        let profit = status
            .profit_for(self.odds, self.stake)?
            .ok_or_else(|| DomainError::InvalidTransition {
                id: self.id.clone(),
                status,
            })?;
        self.status = status;
        self.profit = Some(profit);
        Ok(profit)
    }

    /// Change odds and stake of a wager that is still pending.
    ///
    /// # Errors
    ///
    /// Fails with [`DomainError::WagerLocked`] once the wager left PENDING,
    /// or if the new leg is invalid.
    pub fn amend(&mut self, odds: Odds, stake: Money) -> Result<(), DomainError> {
        if self.is_resolved() || self.settled {
            return Err(DomainError::WagerLocked {
                id: self.id.clone(),
            });
        }
        validate_leg(odds, stake)?;
        self.odds = odds;
        self.stake = stake;
        Ok(())
    }
}

/// An anchor wager with its optional hedge.
#[derive(Debug, Clone, PartialEq)]
pub struct WagerPair {
    pub anchor: Wager,
    pub hedge: Option<Wager>,
}

impl WagerPair {
    /// Group id shared by both legs.
    #[must_use]
    pub fn group_id(&self) -> &GroupId {
        &self.anchor.group_id
    }

    /// Three-branch profits of the pair, recomputed from the current legs.
    ///
    /// Returns `Ok(None)` for an unhedged anchor.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Overflow`] if a branch leaves the decimal range.
    pub fn middle_profits(&self) -> Result<Option<MiddleProfits>, DomainError> {
        self.hedge
            .as_ref()
            .map(|hedge| {
                compute_middle_profits(
                    self.anchor.odds,
                    self.anchor.stake,
                    hedge.odds,
                    hedge.stake,
                )
            })
            .transpose()
    }

    /// Combined stake of both legs.
    #[must_use]
    pub fn turnover(&self) -> Money {
        self.anchor.stake + self.hedge.as_ref().map_or(Decimal::ZERO, |h| h.stake)
    }
}

/// Group wagers into anchor/hedge pairs.
///
/// # Errors
///
/// Fails if a hedge has no anchor in its group or a group holds two legs of
/// the same kind.
pub fn pair_wagers(wagers: &[Wager]) -> Result<Vec<WagerPair>, DomainError> {
    let mut anchors: BTreeMap<&GroupId, &Wager> = BTreeMap::new();
    let mut hedges: BTreeMap<&GroupId, &Wager> = BTreeMap::new();

    for wager in wagers {
        let slot = match wager.kind {
            WagerKind::Anchor => &mut anchors,
            WagerKind::Hedge => &mut hedges,
        };
        if slot.insert(&wager.group_id, wager).is_some() {
            return Err(DomainError::DuplicateLeg {
                group: wager.group_id.clone(),
                kind: wager.kind.as_str(),
            });
        }
    }

    if let Some((group, hedge)) = hedges.iter().find(|(g, _)| !anchors.contains_key(*g)) {
        return Err(DomainError::UnpairedHedge {
            wager: hedge.id.clone(),
            group: (*group).clone(),
        });
    }

    Ok(anchors
        .into_iter()
        .map(|(group, anchor)| WagerPair {
            anchor: anchor.clone(),
            hedge: hedges.get(group).map(|h| (*h).clone()),
        })
        .collect())
}

/// Check that every hedge in `selection` has an anchor somewhere in `book`.
///
/// # Errors
///
/// Returns [`DomainError::UnpairedHedge`] for the first orphan found.
pub fn check_hedges_paired(selection: &[&Wager], book: &[Wager]) -> Result<(), DomainError> {
    let orphan = selection.iter().find(|w| {
        w.kind == WagerKind::Hedge
            && !book
                .iter()
                .any(|a| a.kind == WagerKind::Anchor && a.group_id == w.group_id)
    });
    match orphan {
        Some(hedge) => Err(DomainError::UnpairedHedge {
            wager: hedge.id.clone(),
            group: hedge.group_id.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn wager(group: &str, kind: WagerKind, odds: Decimal, stake: Decimal) -> Wager {
        Wager::try_new(GroupId::from(group), kind, odds, stake, day(), Utc::now()).unwrap()
    }

    #[test]
    fn try_new_rejects_invalid_legs() {
        let g = GroupId::new();
        let now = Utc::now();
        assert!(matches!(
            Wager::try_new(g.clone(), WagerKind::Anchor, dec!(1), dec!(10), day(), now),
            Err(DomainError::InvalidOdds { .. })
        ));
        assert!(matches!(
            Wager::try_new(g.clone(), WagerKind::Anchor, dec!(2), dec!(0), day(), now),
            Err(DomainError::NonPositiveStake { .. })
        ));
        assert!(matches!(
            Wager::try_new(g.clone(), WagerKind::Anchor, MAX_ODDS + dec!(1), dec!(10), day(), now),
            Err(DomainError::OutOfRange { field: "odds", .. })
        ));
        assert!(matches!(
            Wager::try_new(g, WagerKind::Anchor, dec!(10), dec!(10000000000000000000000000000), day(), now),
            Err(DomainError::OutOfRange { field: "stake", .. })
        ));
    }

    #[test]
    fn legs_at_the_bounds_resolve() {
        let mut w = wager("g", WagerKind::Anchor, MAX_ODDS, MAX_STAKE);
        assert_eq!(w.resolve(WagerStatus::Won).unwrap(), MAX_STAKE * (MAX_ODDS - dec!(1)));
    }

    #[test]
    fn profit_overflow_is_an_error() {
        assert_eq!(
            WagerStatus::Won.profit_for(Decimal::MAX, dec!(10)),
            Err(DomainError::Overflow { operation: "multiplication" })
        );
        assert_eq!(WagerStatus::Lost.profit_for(Decimal::MAX, dec!(10)), Ok(Some(dec!(-10))));
    }

    #[test]
    fn new_wager_is_pending_and_unsettled() {
        let w = wager("g", WagerKind::Anchor, dec!(2.0), dec!(50));
        assert_eq!(w.status, WagerStatus::Pending);
        assert!(w.profit.is_none());
        assert!(!w.settled);
        assert!(!w.awaits_settlement());
    }

    #[test]
    fn resolve_sets_profit_per_status() {
        let cases = [
            (WagerStatus::Won, dec!(90)),
            (WagerStatus::HalfWon, dec!(45)),
            (WagerStatus::Lost, dec!(-100)),
            (WagerStatus::HalfLost, dec!(-50)),
            (WagerStatus::Void, dec!(0)),
        ];
        for (status, expected) in cases {
            let mut w = wager("g", WagerKind::Anchor, dec!(1.90), dec!(100));
            assert_eq!(w.resolve(status).unwrap(), expected, "{status}");
            assert_eq!(w.profit, Some(expected));
            assert!(w.awaits_settlement());
        }
    }

    #[test]
    fn resolve_happens_exactly_once() {
        let mut w = wager("g", WagerKind::Anchor, dec!(2.0), dec!(10));
        w.resolve(WagerStatus::Won).unwrap();
        let err = w.resolve(WagerStatus::Lost).unwrap_err();
        assert!(matches!(err, DomainError::AlreadyResolved { .. }));
        assert_eq!(w.profit, Some(dec!(10)));
    }

    #[test]
    fn resolve_to_pending_is_rejected() {
        let mut w = wager("g", WagerKind::Anchor, dec!(2.0), dec!(10));
        let err = w.resolve(WagerStatus::Pending).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(w.status, WagerStatus::Pending);
    }

    #[test]
    fn amend_only_while_pending() {
        let mut w = wager("g", WagerKind::Hedge, dec!(2.0), dec!(10));
        w.amend(dec!(2.2), dec!(12)).unwrap();
        assert_eq!((w.odds, w.stake), (dec!(2.2), dec!(12)));

        w.resolve(WagerStatus::Lost).unwrap();
        assert!(matches!(
            w.amend(dec!(3.0), dec!(1)),
            Err(DomainError::WagerLocked { .. })
        ));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("half-won".parse::<WagerStatus>(), Ok(WagerStatus::HalfWon));
        assert_eq!("VOID".parse::<WagerStatus>(), Ok(WagerStatus::Void));
        assert!("draw".parse::<WagerStatus>().is_err());
        assert_eq!("hedge".parse::<WagerKind>(), Ok(WagerKind::Hedge));
    }

    #[test]
    fn status_serializes_upper_snake() {
        let json = serde_json::to_string(&WagerStatus::HalfLost).unwrap();
        assert_eq!(json, "\"HALF_LOST\"");
    }

    #[test]
    fn pair_wagers_matches_legs_by_group() {
        let wagers = vec![
            wager("a", WagerKind::Anchor, dec!(2.10), dec!(100)),
            wager("a", WagerKind::Hedge, dec!(2.10), dec!(100)),
            wager("b", WagerKind::Anchor, dec!(1.80), dec!(40)),
        ];
        let pairs = pair_wagers(&wagers).unwrap();
        assert_eq!(pairs.len(), 2);

        let hedged = pairs.iter().find(|p| p.group_id().as_str() == "a").unwrap();
        let profits = hedged.middle_profits().unwrap().unwrap();
        assert_eq!(profits.anchor_only, dec!(10));
        assert_eq!(profits.both, dec!(220));
        assert_eq!(hedged.turnover(), dec!(200));

        let single = pairs.iter().find(|p| p.group_id().as_str() == "b").unwrap();
        assert!(single.middle_profits().unwrap().is_none());
    }

    #[test]
    fn pair_wagers_rejects_orphan_hedge() {
        let wagers = vec![wager("x", WagerKind::Hedge, dec!(2.0), dec!(10))];
        assert!(matches!(
            pair_wagers(&wagers),
            Err(DomainError::UnpairedHedge { .. })
        ));
    }

    #[test]
    fn pair_wagers_rejects_duplicate_anchor() {
        let wagers = vec![
            wager("x", WagerKind::Anchor, dec!(2.0), dec!(10)),
            wager("x", WagerKind::Anchor, dec!(2.0), dec!(10)),
        ];
        assert!(matches!(
            pair_wagers(&wagers),
            Err(DomainError::DuplicateLeg { kind: "ANCHOR", .. })
        ));
    }

    #[test]
    fn hedge_check_looks_across_the_whole_book() {
        let anchor = wager("a", WagerKind::Anchor, dec!(2.0), dec!(10));
        let hedge = wager("a", WagerKind::Hedge, dec!(2.0), dec!(10));
        let orphan = wager("z", WagerKind::Hedge, dec!(2.0), dec!(10));
        let book = vec![anchor, hedge.clone(), orphan.clone()];

        assert!(check_hedges_paired(&[&hedge], &book).is_ok());
        assert!(matches!(
            check_hedges_paired(&[&hedge, &orphan], &book),
            Err(DomainError::UnpairedHedge { .. })
        ));
    }

    #[test]
    fn pair_profits_follow_amended_leg() {
        let mut hedge = wager("a", WagerKind::Hedge, dec!(2.10), dec!(100));
        let anchor = wager("a", WagerKind::Anchor, dec!(2.10), dec!(100));
        hedge.amend(dec!(2.20), dec!(100)).unwrap();
        let pairs = pair_wagers(&[anchor, hedge]).unwrap();
        let profits = pairs[0].middle_profits().unwrap().unwrap();
        assert_eq!(profits.hedge_only, dec!(20));
    }
}
