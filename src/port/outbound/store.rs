//! Persistence ports for wagers, participants, ledger and daily history.
//!
//! All operations are synchronous: every call works on a bounded snapshot
//! and completes immediately.
//!
//! # Implementation Notes
//!
//! - Implementations must be thread-safe (`Send + Sync`)
//! - Signed amounts, the settled flag and status enums must round-trip
//!   losslessly
//! - [`SettlementStore::commit_closure`] is all-or-nothing

use chrono::NaiveDate;

use crate::domain::closure::DayClosure;
use crate::domain::history::DailyRecord;
use crate::domain::id::{ParticipantId, WagerId};
use crate::domain::ledger::LedgerEntry;
use crate::domain::participant::Participant;
use crate::domain::wager::Wager;
use crate::error::Result;

/// Storage operations for wagers.
pub trait WagerStore: Send + Sync {
    /// Save a wager, replacing if it exists.
    fn save_wager(&self, wager: &Wager) -> Result<()>;

    /// Get a wager by ID.
    fn get_wager(&self, id: &WagerId) -> Result<Option<Wager>>;

    /// List all wagers, ordered by date then event time.
    fn list_wagers(&self) -> Result<Vec<Wager>>;
}

/// Storage operations for participants and their ledger.
pub trait ParticipantStore: Send + Sync {
    /// Save a participant, replacing if it exists.
    fn save_participant(&self, participant: &Participant) -> Result<()>;

    /// Get a participant by ID.
    fn get_participant(&self, id: &ParticipantId) -> Result<Option<Participant>>;

    /// List all participants.
    fn list_participants(&self) -> Result<Vec<Participant>>;

    /// Append an approved DEPOSIT or WITHDRAWAL and update principal in one
    /// step. Returns the updated participant.
    fn record_transfer(&self, entry: &LedgerEntry) -> Result<Participant>;

    /// Ledger entries of one participant in insertion order.
    fn ledger(&self, id: &ParticipantId) -> Result<Vec<LedgerEntry>>;
}

/// Read access to daily history records.
pub trait HistoryStore: Send + Sync {
    /// All records ordered by date.
    fn list_history(&self) -> Result<Vec<DailyRecord>>;

    /// The record for one date, if closed.
    fn get_history(&self, date: NaiveDate) -> Result<Option<DailyRecord>>;
}

/// Consistent view of the entities a closure reads.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub wagers: Vec<Wager>,
    pub participants: Vec<Participant>,
}

/// The settlement boundary.
pub trait SettlementStore: Send + Sync {
    /// Read wagers and participants as of one instant.
    fn snapshot(&self) -> Result<Snapshot>;

    /// Apply a closure atomically.
    ///
    /// Must fail with nothing written if any listed wager is already
    /// settled ([`SettlementError::AlreadySettled`]) or a record for the
    /// date exists ([`SettlementError::AlreadyClosed`]).
    ///
    /// [`SettlementError::AlreadySettled`]: crate::error::SettlementError::AlreadySettled
    /// [`SettlementError::AlreadyClosed`]: crate::error::SettlementError::AlreadyClosed
    fn commit_closure(&self, closure: &DayClosure) -> Result<()>;
}
