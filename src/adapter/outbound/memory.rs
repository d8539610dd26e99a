//! In-memory store implementation.
//!
//! Holds the whole state behind one `RwLock` so a closure commit validates
//! and mutates under a single write guard.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::domain::closure::DayClosure;
use crate::domain::error::DomainError;
use crate::domain::history::DailyRecord;
use crate::domain::id::{ParticipantId, WagerId};
use crate::domain::ledger::LedgerEntry;
use crate::domain::participant::Participant;
use crate::domain::wager::Wager;
use crate::error::{Result, SettlementError};
use crate::port::outbound::{HistoryStore, ParticipantStore, SettlementStore, Snapshot, WagerStore};

#[derive(Debug, Default)]
struct State {
    wagers: BTreeMap<WagerId, Wager>,
    participants: BTreeMap<ParticipantId, Participant>,
    ledger: Vec<LedgerEntry>,
    history: BTreeMap<NaiveDate, DailyRecord>,
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ledger entries across all participants.
    pub fn ledger_len(&self) -> usize {
        self.state.read().ledger.len()
    }
}

fn sorted_wagers<'a>(wagers: impl Iterator<Item = &'a Wager>) -> Vec<Wager> {
    let mut list: Vec<Wager> = wagers.cloned().collect();
    list.sort_by(|a, b| a.date.cmp(&b.date).then(a.event_at.cmp(&b.event_at)));
    list
}

impl WagerStore for MemoryStore {
    fn save_wager(&self, wager: &Wager) -> Result<()> {
        let mut state = self.state.write();
        let stored_date = state.wagers.get(&wager.id).map(|w| w.date);
        if let Some(date) = std::iter::once(wager.date)
            .chain(stored_date)
            .find(|date| state.history.contains_key(date))
        {
            return Err(DomainError::DayClosed { date }.into());
        }
        state.wagers.insert(wager.id.clone(), wager.clone());
        Ok(())
    }

    fn get_wager(&self, id: &WagerId) -> Result<Option<Wager>> {
        Ok(self.state.read().wagers.get(id).cloned())
    }

    fn list_wagers(&self) -> Result<Vec<Wager>> {
        Ok(sorted_wagers(self.state.read().wagers.values()))
    }
}

impl ParticipantStore for MemoryStore {
    fn save_participant(&self, participant: &Participant) -> Result<()> {
        self.state
            .write()
            .participants
            .insert(participant.id.clone(), participant.clone());
        Ok(())
    }

    fn get_participant(&self, id: &ParticipantId) -> Result<Option<Participant>> {
        Ok(self.state.read().participants.get(id).cloned())
    }

    fn list_participants(&self) -> Result<Vec<Participant>> {
        Ok(self.state.read().participants.values().cloned().collect())
    }

    fn record_transfer(&self, entry: &LedgerEntry) -> Result<Participant> {
        let mut state = self.state.write();
        let participant = state
            .participants
            .get_mut(&entry.participant_id)
            .ok_or_else(|| SettlementError::UnknownParticipant(entry.participant_id.clone()))?;
        participant.apply_transfer(entry)?;
        let updated = participant.clone();
        state.ledger.push(entry.clone());
        Ok(updated)
    }

    fn ledger(&self, id: &ParticipantId) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .state
            .read()
            .ledger
            .iter()
            .filter(|e| &e.participant_id == id)
            .cloned()
            .collect())
    }
}

impl HistoryStore for MemoryStore {
    fn list_history(&self) -> Result<Vec<DailyRecord>> {
        Ok(self.state.read().history.values().cloned().collect())
    }

    fn get_history(&self, date: NaiveDate) -> Result<Option<DailyRecord>> {
        Ok(self.state.read().history.get(&date).cloned())
    }
}

impl SettlementStore for MemoryStore {
    fn snapshot(&self) -> Result<Snapshot> {
        let state = self.state.read();
        Ok(Snapshot {
            wagers: sorted_wagers(state.wagers.values()),
            participants: state.participants.values().cloned().collect(),
        })
    }

    fn commit_closure(&self, closure: &DayClosure) -> Result<()> {
        let mut state = self.state.write();
        let date = closure.date();

        // Validate everything before the first mutation.
        if state.history.contains_key(&date) {
            return Err(SettlementError::AlreadyClosed { date }.into());
        }
        let mut conflicting = 0;
        for id in &closure.wager_ids {
            match state.wagers.get(id) {
                Some(w) if w.settled => conflicting += 1,
                Some(_) => {}
                None => return Err(SettlementError::UnknownWager(id.clone()).into()),
            }
        }
        if conflicting > 0 {
            return Err(SettlementError::AlreadySettled { date, conflicting }.into());
        }
        let left = closure.left_behind(state.wagers.values());
        if left.pending > 0 {
            return Err(SettlementError::PendingWagers { date, pending: left.pending }.into());
        }
        if left.resolved > 0 {
            return Err(SettlementError::BookChanged { date }.into());
        }
        if let Some(missing) = closure
            .allocations
            .iter()
            .find(|a| !state.participants.contains_key(&a.participant_id))
        {
            return Err(SettlementError::UnknownParticipant(missing.participant_id.clone()).into());
        }

        for id in &closure.wager_ids {
            if let Some(wager) = state.wagers.get_mut(id) {
                wager.settled = true;
            }
        }
        for allocation in &closure.allocations {
            if let Some(participant) = state.participants.get_mut(&allocation.participant_id) {
                participant.credit(allocation.gross, allocation.fee, allocation.net);
            }
        }
        state.ledger.extend(closure.entries.iter().cloned());
        state.history.insert(date, closure.record.clone());
        Ok(())
    }
}
