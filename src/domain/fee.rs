//! Tiered platform fee schedule.
//!
//! The rate is a pure step function of the active-participant count; callers
//! pass the freshest count on every call.

use rust_decimal::Decimal;

use super::money::Rate;

/// Highest rate the schedule can produce.
pub const FEE_RATE_CAP: Rate = Decimal::from_parts(19, 0, 0, false, 2);

/// Inclusive upper bound of each bracket, its rate in basis points, and label.
const TIERS: [(usize, u32, &str); 8] = [
    (1, 0, "fewer than 2 participants (0%)"),
    (5, 100, "2-5 participants (1%)"),
    (10, 150, "6-10 participants (1.5%)"),
    (20, 200, "11-20 participants (2%)"),
    (50, 250, "21-50 participants (2.5%)"),
    (100, 500, "51-100 participants (5%)"),
    (200, 1000, "101-200 participants (10%)"),
    (500, 1500, "201-500 participants (15%)"),
];

const TOP_LABEL: &str = "over 500 participants (19%)";

fn bps(points: u32) -> Rate {
    Decimal::new(i64::from(points), 4)
}

/// Fee rate applied to positive gains for a pool of `active_count` participants.
#[must_use]
pub fn fee_rate(active_count: usize) -> Rate {
    TIERS
        .iter()
        .find(|(upper, _, _)| active_count <= *upper)
        .map_or(FEE_RATE_CAP, |(_, points, _)| bps(*points))
}

/// Human-readable bracket description for audit display.
#[must_use]
pub fn fee_tier_label(active_count: usize) -> &'static str {
    TIERS
        .iter()
        .find(|(upper, _, _)| active_count <= *upper)
        .map_or(TOP_LABEL, |(_, _, label)| *label)
}
