//! Settlement orchestrator.
//!
//! Turns a date's resolved-but-unsettled wagers into ledger entries, one
//! daily record and settled flags, exactly once.
//!
//! # Flow
//!
//! ```text
//! close_day(date)
//!   |
//!   +-- per-date lock
//!   +-- SettlementStore::snapshot()
//!   +-- select resolved && !settled on date ---- empty --> NothingToSettle
//!   +-- any PENDING wager on date -------------- PendingWagers
//!   +-- validate legs and hedge pairing
//!   +-- aggregate (VoidPolicy)
//!   +-- distribute(participants, gross, fee_rate(active count))
//!   +-- SettlementStore::commit_closure()  (all-or-nothing)
//!   v
//! Settled(DailyRecord)
//! ```
//!
//! A day closes only once every wager on it has an outcome; after that the
//! store freezes the date, so no wager on it can be added, resolved or
//! amended. Re-running a closed date selects nothing and is a no-op. Two closures of
//! the same date are serialized by the per-date lock inside one process and
//! by the store's conditional commit across processes.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::closure::{aggregate, pending_on, select_unsettled, DayClosure, VoidPolicy};
use crate::domain::distribution::distribute;
use crate::domain::fee::fee_rate;
use crate::domain::history::DailyRecord;
use crate::domain::money::Money;
use crate::domain::wager::{check_hedges_paired, validate_leg};
use crate::error::{Result, SettlementError};
use crate::port::outbound::SettlementStore;

/// Result of a closure attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClosureOutcome {
    /// No resolved, unsettled wager on the date.
    NothingToSettle,
    /// The day was closed and this record written.
    Settled(DailyRecord),
}

impl ClosureOutcome {
    /// Returns true if this attempt wrote a record.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }
}

/// Daily closure orchestrator.
pub struct Settlement<S> {
    store: Arc<S>,
    void_policy: VoidPolicy,
    locks: DashMap<NaiveDate, Arc<Mutex<()>>>,
}

impl<S: SettlementStore> Settlement<S> {
    /// Create an orchestrator over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            void_policy: VoidPolicy::default(),
            locks: DashMap::new(),
        }
    }

    /// Choose how VOID wagers enter the totals.
    #[must_use]
    pub fn with_void_policy(mut self, policy: VoidPolicy) -> Self {
        self.void_policy = policy;
        self
    }

    /// The active VOID policy.
    #[must_use]
    pub const fn void_policy(&self) -> VoidPolicy {
        self.void_policy
    }

    /// Close `date` without notes.
    ///
    /// # Errors
    ///
    /// See [`Settlement::close_day_with_notes`].
    pub fn close_day(&self, date: NaiveDate) -> Result<ClosureOutcome> {
        self.close_day_with_notes(date, None)
    }

    /// Close `date`, attaching `notes` to the daily record.
    ///
    /// # Errors
    ///
    /// Fails while a wager on the date is still pending, on an invalid wager
    /// in the selection, a hedge without anchor, a concurrent closure of the
    /// same wagers, an existing record for the date, or a store failure.
    /// Nothing is written in any failure case.
    pub fn close_day_with_notes(
        &self,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Result<ClosureOutcome> {
        let lock = self.date_lock(date);
        let _guard = lock.lock();

        let snapshot = self.store.snapshot()?;
        let selection = select_unsettled(&snapshot.wagers, date);
        if selection.is_empty() {
            debug!(%date, "No resolved wagers awaiting settlement");
            return Ok(ClosureOutcome::NothingToSettle);
        }
        let pending = pending_on(&snapshot.wagers, date);
        if pending > 0 {
            warn!(%date, pending, "Day still has pending wagers");
            return Err(SettlementError::PendingWagers { date, pending }.into());
        }

        for wager in &selection {
            validate_leg(wager.odds, wager.stake)?;
        }
        check_hedges_paired(&selection, &snapshot.wagers)?;

        let totals = aggregate(&selection, self.void_policy);
        let active = snapshot
            .participants
            .iter()
            .filter(|p| p.is_active_investor())
            .count();
        let rate = fee_rate(active);
        let bank_start: Money = snapshot
            .participants
            .iter()
            .filter(|p| p.is_eligible())
            .map(|p| p.capital())
            .sum();

        debug!(
            %date,
            selected = selection.len(),
            turnover = %totals.turnover,
            gross = %totals.gross_profit,
            active,
            fee_rate = %rate,
            "Closing day"
        );

        let distribution = distribute(&snapshot.participants, totals.gross_profit, rate, date);
        if distribution.is_empty() {
            warn!(%date, "No eligible participants; day result is recorded but not distributed");
        }

        let record = DailyRecord {
            date,
            turnover: totals.turnover,
            gross_profit: totals.gross_profit,
            wager_count: totals.wager_count,
            bank_start,
            bank_end: bank_start + distribution.total_net,
            net_distributed: distribution.total_net,
            fees_collected: distribution.total_fees,
            notes,
        };

        let closure = DayClosure {
            record,
            wager_ids: selection.iter().map(|w| w.id.clone()).collect(),
            allocations: distribution.allocations,
            entries: distribution.entries,
        };

        if let Err(e) = self.store.commit_closure(&closure) {
            warn!(%date, error = %e, "Closure commit failed; nothing was applied");
            return Err(e);
        }

        info!(
            %date,
            wagers = closure.wager_ids.len(),
            gross = %closure.record.gross_profit,
            net = %closure.record.net_distributed,
            fees = %closure.record.fees_collected,
            "Day settled"
        );
        Ok(ClosureOutcome::Settled(closure.record))
    }

    fn date_lock(&self, date: NaiveDate) -> Arc<Mutex<()>> {
        self.locks.entry(date).or_default().clone()
    }
}
