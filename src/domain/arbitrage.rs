//! Hedge calculators for anchor + hedge wager pairs.
//!
//! Given one leg already placed, solve for odds and stake of the other leg
//! so that one outcome branch returns at least a target share of the known
//! stake while the "middle" (both legs winning) stays positive.
//!
//! Three branches are always evaluated for a pair:
//!
//! - `anchor_only` = s1·(o1−1) − s2
//! - `hedge_only`  = s2·(o2−1) − s1
//! - `both`        = s1·(o1−1) + s2·(o2−1)
//!
//! Infeasibility is a normal answer, returned as [`Suggestion::Infeasible`].
//! Only structurally invalid input (odds ≤ 1, stake ≤ 0, legs above their
//! bounds, negative target or buffer) and results outside the decimal range
//! are errors.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;
use super::money::{Money, Odds};
use super::wager::validate_leg;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Profit of an anchor + hedge pair under each outcome branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MiddleProfits {
    /// Only the anchor wins.
    pub anchor_only: Money,
    /// Only the hedge wins.
    pub hedge_only: Money,
    /// Both legs win (the "middle").
    pub both: Money,
}

impl MiddleProfits {
    /// Smallest profit over the two single-leg branches.
    #[must_use]
    pub fn worst_single(&self) -> Money {
        self.anchor_only.min(self.hedge_only)
    }
}

/// Three-branch profit of a pair.
///
/// This is the single source of truth for pair profit math: calculators and
/// any later edit to either leg recompute through it.
///
/// # Errors
///
/// Returns [`DomainError::Overflow`] if a branch leaves the decimal range.
pub fn compute_middle_profits(o1: Odds, s1: Money, o2: Odds, s2: Money) -> Result<MiddleProfits, DomainError> {
    let anchor_gain = mul(s1, sub(o1, Decimal::ONE)?)?;
    let hedge_gain = mul(s2, sub(o2, Decimal::ONE)?)?;
    Ok(MiddleProfits {
        anchor_only: sub(anchor_gain, s2)?,
        hedge_only: sub(hedge_gain, s1)?,
        both: add(anchor_gain, hedge_gain)?,
    })
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal, DomainError> {
    a.checked_add(b).ok_or(DomainError::Overflow { operation: "addition" })
}

fn sub(a: Decimal, b: Decimal) -> Result<Decimal, DomainError> {
    a.checked_sub(b).ok_or(DomainError::Overflow { operation: "subtraction" })
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, DomainError> {
    a.checked_mul(b).ok_or(DomainError::Overflow { operation: "multiplication" })
}

/// Callers only divide by values already checked positive.
fn div(a: Decimal, b: Decimal) -> Result<Decimal, DomainError> {
    a.checked_div(b).ok_or(DomainError::Overflow { operation: "division" })
}

/// Why a hedge request cannot meet its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Infeasibility {
    /// The known leg's own margin cannot fund the target at any odds.
    MarginTooThin,
    /// Solved minimum odds do not exceed 1.
    DegenerateOdds,
    /// Solved stake is not positive.
    NonPositiveStake,
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarginTooThin => write!(f, "target exceeds the margin of the placed leg"),
            Self::DegenerateOdds => write!(f, "required odds do not exceed 1"),
            Self::NonPositiveStake => write!(f, "required stake is not positive"),
        }
    }
}

/// Recommended leg for a feasible request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HedgeQuote {
    /// Recommended odds (minimum odds plus the operator buffer).
    pub odds: Odds,
    /// Smallest odds that still meet the target.
    pub min_odds: Odds,
    /// Recommended stake.
    pub stake: Money,
    /// Branch profits of the resulting pair.
    pub profits: MiddleProfits,
    /// Target profit in currency.
    pub target: Money,
}

/// Outcome of a hedge calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "feasible", content = "quote")]
pub enum Suggestion {
    #[serde(rename = "true")]
    Feasible(HedgeQuote),
    #[serde(rename = "false")]
    Infeasible(Infeasibility),
}

impl Suggestion {
    /// Returns true if the target can be met.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    /// The quote, if feasible.
    #[must_use]
    pub const fn quote(&self) -> Option<&HedgeQuote> {
        match self {
            Self::Feasible(quote) => Some(quote),
            Self::Infeasible(_) => None,
        }
    }
}

fn validate_request(
    odds: Odds,
    stake: Money,
    target_pct: Decimal,
    odds_buffer: Decimal,
) -> Result<(), DomainError> {
    validate_leg(odds, stake)?;
    if target_pct < Decimal::ZERO {
        return Err(DomainError::NegativeTarget { pct: target_pct });
    }
    if odds_buffer < Decimal::ZERO {
        return Err(DomainError::NegativeBuffer {
            buffer: odds_buffer,
        });
    }
    Ok(())
}

/// Solve for the hedge leg given a placed anchor.
///
/// `target_pct` is a percentage of the anchor stake (10 = 10%) that the
/// anchor-only branch must return; `odds_buffer` is added on top of the
/// minimum hedge odds.
///
/// # Errors
///
/// Returns a [`DomainError`] for structurally invalid input.
pub fn suggest_hedge_from_anchor(
    o1: Odds,
    s1: Money,
    target_pct: Decimal,
    odds_buffer: Decimal,
) -> Result<Suggestion, DomainError> {
    validate_request(o1, s1, target_pct, odds_buffer)?;

    let fraction = target_pct / HUNDRED;
    if fraction >= o1 - Decimal::ONE {
        return Ok(Suggestion::Infeasible(Infeasibility::MarginTooThin));
    }

    let target = mul(s1, fraction)?;
    let spare = sub(mul(s1, o1 - Decimal::ONE)?, target)?;
    // Only rounding at the edge of the decimal scale can make this zero.
    if spare <= Decimal::ZERO {
        return Ok(Suggestion::Infeasible(Infeasibility::MarginTooThin));
    }
    let covered = add(s1, target)?;
    let min_odds = add(Decimal::ONE, div(covered, spare)?)?;
    if min_odds <= Decimal::ONE {
        return Ok(Suggestion::Infeasible(Infeasibility::DegenerateOdds));
    }

    let o2 = add(min_odds, odds_buffer)?;
    let lower = div(covered, o2 - Decimal::ONE)?;
    let upper = spare;
    let s2 = if lower > upper {
        lower
    } else {
        div(mul(s1, o1)?, o2)?.clamp(lower, upper)
    };

    Ok(Suggestion::Feasible(HedgeQuote {
        odds: o2,
        min_odds,
        stake: s2,
        profits: compute_middle_profits(o1, s1, o2, s2)?,
        target,
    }))
}

/// Solve for the anchor leg given a placed hedge.
///
/// Mirror image of [`suggest_hedge_from_anchor`]: the hedge-only branch
/// returns `target_pct` of the hedge stake.
///
/// # Errors
///
/// Returns a [`DomainError`] for structurally invalid input.
pub fn suggest_anchor_from_hedge(
    o2: Odds,
    s2: Money,
    target_pct: Decimal,
    odds_buffer: Decimal,
) -> Result<Suggestion, DomainError> {
    validate_request(o2, s2, target_pct, odds_buffer)?;

    let fraction = target_pct / HUNDRED;
    if o2 - Decimal::ONE <= fraction {
        return Ok(Suggestion::Infeasible(Infeasibility::MarginTooThin));
    }

    let target = mul(s2, fraction)?;
    let s1 = mul(s2, o2 - Decimal::ONE - fraction)?;
    if s1 <= Decimal::ZERO {
        return Ok(Suggestion::Infeasible(Infeasibility::NonPositiveStake));
    }

    let min_odds = add(Decimal::ONE, div(add(target, s2)?, s1)?)?;
    if min_odds <= Decimal::ONE {
        return Ok(Suggestion::Infeasible(Infeasibility::DegenerateOdds));
    }
    let o1 = add(min_odds, odds_buffer)?;

    Ok(Suggestion::Feasible(HedgeQuote {
        odds: o1,
        min_odds,
        stake: s1,
        profits: compute_middle_profits(o1, s1, o2, s2)?,
        target,
    }))
}
