//! Monetary types for stakes, odds and rates.
//!
//! Everything is a `Decimal`: currency is never carried in binary floating
//! point, and no rounding happens inside the engine.

use rust_decimal::Decimal;

/// Signed currency amount.
pub type Money = Decimal;

/// Decimal (European) odds; always greater than 1 for a valid wager.
pub type Odds = Decimal;

/// Fractional rate, e.g. `0.015` for 1.5%.
pub type Rate = Decimal;

/// Tolerance used when comparing sums that went through division.
pub const EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Round an amount to cents for display.
#[must_use]
pub fn cents(amount: Money) -> Money {
    amount.round_dp(2)
}

/// True if two amounts agree within [`EPSILON`].
#[must_use]
pub fn approx_eq(a: Money, b: Money) -> bool {
    (a - b).abs() <= EPSILON
}
