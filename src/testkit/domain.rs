//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for dates, wagers and participants
//! so tests focus on assertions rather than construction boilerplate.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::id::GroupId;
use crate::domain::participant::{Participant, Role};
use crate::domain::wager::{Wager, WagerKind, WagerStatus};

/// Build a date, panicking on an invalid one.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// A pending wager on `date` with a fixed event time at noon UTC.
pub fn pending(kind: WagerKind, group: &GroupId, odds: Decimal, stake: Decimal, date: NaiveDate) -> Wager {
    let event_at = Utc
        .from_utc_datetime(&date.and_hms_opt(12, 0, 0).expect("valid time"));
    Wager::try_new(group.clone(), kind, odds, stake, date, event_at).expect("valid test wager")
}

/// A wager already resolved to `status`.
pub fn resolved(
    kind: WagerKind,
    group: &GroupId,
    odds: Decimal,
    stake: Decimal,
    status: WagerStatus,
    date: NaiveDate,
) -> Wager {
    let mut wager = pending(kind, group, odds, stake, date);
    wager.resolve(status).expect("pending wager resolves");
    wager
}

/// A resolved anchor alone in a fresh group.
pub fn anchor(odds: Decimal, stake: Decimal, status: WagerStatus, date: NaiveDate) -> Wager {
    resolved(WagerKind::Anchor, &GroupId::new(), odds, stake, status, date)
}

/// A resolved anchor and hedge sharing one group.
pub fn pair(
    anchor: (Decimal, Decimal, WagerStatus),
    hedge: (Decimal, Decimal, WagerStatus),
    date: NaiveDate,
) -> (Wager, Wager) {
    let group = GroupId::new();
    (
        resolved(WagerKind::Anchor, &group, anchor.0, anchor.1, anchor.2, date),
        resolved(WagerKind::Hedge, &group, hedge.0, hedge.1, hedge.2, date),
    )
}

/// An active investor with the given principal.
pub fn investor(name: &str, principal: Decimal) -> Participant {
    Participant::new(name, Role::Investor).with_principal(principal)
}

/// An active manager; never takes part in distributions.
pub fn manager(name: &str) -> Participant {
    Participant::new(name, Role::Manager)
}
