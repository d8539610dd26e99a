//! SQLite store implementation.
//!
//! Persists wagers, participants, ledger entries and daily history with
//! Diesel. Decimals are stored as TEXT so signed amounts and their scale
//! round-trip exactly. A closure commit runs inside one IMMEDIATE
//! transaction, which takes SQLite's write lock up front: a second writer
//! closing the same date waits, then sees the wagers already settled.
//! Wager saves take the same lock and are refused once their date has a
//! daily record.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    DailyHistoryRow, LedgerRow, NewLedgerRow, ParticipantRow, WagerRow,
};
use crate::adapter::outbound::sqlite::database::schema::{
    daily_history, ledger_entries, participants, wagers,
};
use crate::domain::closure::DayClosure;
use crate::domain::error::DomainError;
use crate::domain::history::DailyRecord;
use crate::domain::id::{GroupId, ParticipantId, WagerId};
use crate::domain::ledger::LedgerEntry;
use crate::domain::participant::{CycleTotals, Participant};
use crate::domain::wager::Wager;
use crate::error::{Error, Result, SettlementError};
use crate::port::outbound::{HistoryStore, ParticipantStore, SettlementStore, Snapshot, WagerStore};

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| Error::Parse(format!("invalid decimal '{value}': {e}")))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| Error::Parse(format!("invalid date '{value}': {e}")))
}

fn parse_enum<T: FromStr<Err = String>>(value: &str) -> Result<T> {
    value.parse().map_err(Error::Parse)
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// SQLite-backed store for the settlement engine.
///
/// Implements [`WagerStore`], [`ParticipantStore`], [`HistoryStore`] and
/// [`SettlementStore`].
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<Conn> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    fn wager_to_row(wager: &Wager) -> WagerRow {
        WagerRow {
            id: wager.id.to_string(),
            group_id: wager.group_id.to_string(),
            kind: wager.kind.as_str().to_string(),
            odds: wager.odds.to_string(),
            stake: wager.stake.to_string(),
            status: wager.status.as_str().to_string(),
            settlement_date: format_date(wager.date),
            event_at: wager.event_at.to_rfc3339(),
            profit: wager.profit.map(|p| p.to_string()),
            settled: wager.settled,
            notes: wager.notes.clone(),
        }
    }

    fn wager_from_row(row: WagerRow) -> Result<Wager> {
        let event_at = DateTime::parse_from_rfc3339(&row.event_at)
            .map_err(|e| Error::Parse(format!("invalid timestamp '{}': {e}", row.event_at)))?
            .with_timezone(&Utc);
        Ok(Wager {
            id: WagerId::from(row.id),
            group_id: GroupId::from(row.group_id),
            kind: parse_enum(&row.kind)?,
            odds: parse_decimal(&row.odds)?,
            stake: parse_decimal(&row.stake)?,
            status: parse_enum(&row.status)?,
            date: parse_date(&row.settlement_date)?,
            event_at,
            profit: row.profit.as_deref().map(parse_decimal).transpose()?,
            settled: row.settled,
            notes: row.notes,
        })
    }

    fn participant_to_row(participant: &Participant) -> ParticipantRow {
        ParticipantRow {
            id: participant.id.to_string(),
            name: participant.name.clone(),
            role: participant.role.as_str().to_string(),
            principal: participant.principal.to_string(),
            total_profit: participant.total_profit.to_string(),
            active: participant.active,
            cycle_gross: participant.cycle.gross.to_string(),
            cycle_fees: participant.cycle.fees.to_string(),
            cycle_net: participant.cycle.net.to_string(),
        }
    }

    fn participant_from_row(row: ParticipantRow) -> Result<Participant> {
        Ok(Participant {
            id: ParticipantId::from(row.id),
            name: row.name,
            role: parse_enum(&row.role)?,
            principal: parse_decimal(&row.principal)?,
            total_profit: parse_decimal(&row.total_profit)?,
            active: row.active,
            cycle: CycleTotals {
                gross: parse_decimal(&row.cycle_gross)?,
                fees: parse_decimal(&row.cycle_fees)?,
                net: parse_decimal(&row.cycle_net)?,
            },
        })
    }

    fn ledger_to_row(entry: &LedgerEntry) -> NewLedgerRow {
        NewLedgerRow {
            participant_id: entry.participant_id.to_string(),
            entry_date: format_date(entry.date),
            amount: entry.amount.to_string(),
            kind: entry.kind.as_str().to_string(),
        }
    }

    fn ledger_from_row(row: LedgerRow) -> Result<LedgerEntry> {
        Ok(LedgerEntry {
            participant_id: ParticipantId::from(row.participant_id),
            date: parse_date(&row.entry_date)?,
            amount: parse_decimal(&row.amount)?,
            kind: parse_enum(&row.kind)?,
        })
    }

    fn history_to_row(record: &DailyRecord) -> DailyHistoryRow {
        DailyHistoryRow {
            date: format_date(record.date),
            turnover: record.turnover.to_string(),
            gross_profit: record.gross_profit.to_string(),
            wager_count: i32::try_from(record.wager_count).unwrap_or(i32::MAX),
            bank_start: record.bank_start.to_string(),
            bank_end: record.bank_end.to_string(),
            net_distributed: record.net_distributed.to_string(),
            fees_collected: record.fees_collected.to_string(),
            notes: record.notes.clone(),
        }
    }

    fn history_from_row(row: DailyHistoryRow) -> Result<DailyRecord> {
        Ok(DailyRecord {
            date: parse_date(&row.date)?,
            turnover: parse_decimal(&row.turnover)?,
            gross_profit: parse_decimal(&row.gross_profit)?,
            wager_count: u32::try_from(row.wager_count)
                .map_err(|e| Error::Parse(format!("invalid wager count: {e}")))?,
            bank_start: parse_decimal(&row.bank_start)?,
            bank_end: parse_decimal(&row.bank_end)?,
            net_distributed: parse_decimal(&row.net_distributed)?,
            fees_collected: parse_decimal(&row.fees_collected)?,
            notes: row.notes,
        })
    }

    fn load_wagers(conn: &mut SqliteConnection) -> Result<Vec<Wager>> {
        wagers::table
            .order((wagers::settlement_date.asc(), wagers::event_at.asc()))
            .select(WagerRow::as_select())
            .load(conn)?
            .into_iter()
            .map(Self::wager_from_row)
            .collect()
    }

    fn load_participants(conn: &mut SqliteConnection) -> Result<Vec<Participant>> {
        participants::table
            .order(participants::name.asc())
            .select(ParticipantRow::as_select())
            .load(conn)?
            .into_iter()
            .map(Self::participant_from_row)
            .collect()
    }

    fn load_participant(conn: &mut SqliteConnection, id: &ParticipantId) -> Result<Option<Participant>> {
        participants::table
            .find(id.as_str())
            .select(ParticipantRow::as_select())
            .first(conn)
            .optional()?
            .map(Self::participant_from_row)
            .transpose()
    }

    fn apply_closure(conn: &mut SqliteConnection, closure: &DayClosure) -> Result<()> {
        let date = closure.date();

        let existing = daily_history::table
            .find(format_date(date))
            .count()
            .get_result::<i64>(conn)?;
        if existing > 0 {
            return Err(SettlementError::AlreadyClosed { date }.into());
        }

        let ids: Vec<&str> = closure.wager_ids.iter().map(WagerId::as_str).collect();
        let flags: HashMap<String, bool> = wagers::table
            .filter(wagers::id.eq_any(&ids))
            .select((wagers::id, wagers::settled))
            .load::<(String, bool)>(conn)?
            .into_iter()
            .collect();
        if let Some(missing) = closure
            .wager_ids
            .iter()
            .find(|id| !flags.contains_key(id.as_str()))
        {
            return Err(SettlementError::UnknownWager(missing.clone()).into());
        }
        let conflicting = flags.values().filter(|settled| **settled).count();
        if conflicting > 0 {
            return Err(SettlementError::AlreadySettled { date, conflicting }.into());
        }

        let unsettled: Vec<Wager> = wagers::table
            .filter(wagers::settlement_date.eq(format_date(date)))
            .filter(wagers::settled.eq(false))
            .select(WagerRow::as_select())
            .load(conn)?
            .into_iter()
            .map(Self::wager_from_row)
            .collect::<Result<_>>()?;
        let left = closure.left_behind(&unsettled);
        if left.pending > 0 {
            return Err(SettlementError::PendingWagers { date, pending: left.pending }.into());
        }
        if left.resolved > 0 {
            return Err(SettlementError::BookChanged { date }.into());
        }

        let flipped = diesel::update(
            wagers::table
                .filter(wagers::id.eq_any(&ids))
                .filter(wagers::settled.eq(false)),
        )
        .set(wagers::settled.eq(true))
        .execute(conn)?;
        if flipped != ids.len() {
            return Err(SettlementError::AlreadySettled {
                date,
                conflicting: ids.len().saturating_sub(flipped),
            }
            .into());
        }

        for allocation in &closure.allocations {
            let mut participant = Self::load_participant(conn, &allocation.participant_id)?
                .ok_or_else(|| SettlementError::UnknownParticipant(allocation.participant_id.clone()))?;
            participant.credit(allocation.gross, allocation.fee, allocation.net);
            diesel::update(participants::table.find(participant.id.as_str()))
                .set(&Self::participant_to_row(&participant))
                .execute(conn)?;
        }

        let entries: Vec<NewLedgerRow> = closure.entries.iter().map(Self::ledger_to_row).collect();
        diesel::insert_into(ledger_entries::table)
            .values(&entries)
            .execute(conn)?;

        diesel::insert_into(daily_history::table)
            .values(&Self::history_to_row(&closure.record))
            .execute(conn)?;

        Ok(())
    }
}

impl WagerStore for SqliteStore {
    fn save_wager(&self, wager: &Wager) -> Result<()> {
        let row = Self::wager_to_row(wager);
        let mut conn = self.conn()?;
        // Same write lock as a closure commit, so the check cannot race it.
        conn.immediate_transaction::<_, Error, _>(|conn| {
            let stored: Option<String> = wagers::table
                .find(row.id.as_str())
                .select(wagers::settlement_date)
                .first(conn)
                .optional()?;
            let dates: Vec<&str> = std::iter::once(row.settlement_date.as_str())
                .chain(stored.as_deref())
                .collect();
            let closed: Option<String> = daily_history::table
                .filter(daily_history::date.eq_any(&dates))
                .select(daily_history::date)
                .first(conn)
                .optional()?;
            if let Some(date) = closed {
                return Err(DomainError::DayClosed { date: parse_date(&date)? }.into());
            }

            diesel::insert_into(wagers::table)
                .values(&row)
                .on_conflict(wagers::id)
                .do_update()
                .set(&row)
                .execute(conn)?;
            Ok(())
        })?;
        debug!(id = %wager.id, status = %wager.status, "Saved wager");
        Ok(())
    }

    fn get_wager(&self, id: &WagerId) -> Result<Option<Wager>> {
        let mut conn = self.conn()?;
        wagers::table
            .find(id.as_str())
            .select(WagerRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Self::wager_from_row)
            .transpose()
    }

    fn list_wagers(&self) -> Result<Vec<Wager>> {
        let mut conn = self.conn()?;
        Self::load_wagers(&mut conn)
    }
}

impl ParticipantStore for SqliteStore {
    fn save_participant(&self, participant: &Participant) -> Result<()> {
        let row = Self::participant_to_row(participant);
        let mut conn = self.conn()?;
        diesel::insert_into(participants::table)
            .values(&row)
            .on_conflict(participants::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;
        Ok(())
    }

    fn get_participant(&self, id: &ParticipantId) -> Result<Option<Participant>> {
        let mut conn = self.conn()?;
        Self::load_participant(&mut conn, id)
    }

    fn list_participants(&self) -> Result<Vec<Participant>> {
        let mut conn = self.conn()?;
        Self::load_participants(&mut conn)
    }

    fn record_transfer(&self, entry: &LedgerEntry) -> Result<Participant> {
        let mut conn = self.conn()?;
        conn.immediate_transaction::<_, Error, _>(|conn| {
            let mut participant = Self::load_participant(conn, &entry.participant_id)?
                .ok_or_else(|| SettlementError::UnknownParticipant(entry.participant_id.clone()))?;
            participant.apply_transfer(entry)?;
            diesel::update(participants::table.find(participant.id.as_str()))
                .set(&Self::participant_to_row(&participant))
                .execute(conn)?;
            diesel::insert_into(ledger_entries::table)
                .values(&Self::ledger_to_row(entry))
                .execute(conn)?;
            Ok(participant)
        })
    }

    fn ledger(&self, id: &ParticipantId) -> Result<Vec<LedgerEntry>> {
        let mut conn = self.conn()?;
        ledger_entries::table
            .filter(ledger_entries::participant_id.eq(id.as_str()))
            .order(ledger_entries::id.asc())
            .select(LedgerRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(Self::ledger_from_row)
            .collect()
    }
}

impl HistoryStore for SqliteStore {
    fn list_history(&self) -> Result<Vec<DailyRecord>> {
        let mut conn = self.conn()?;
        daily_history::table
            .order(daily_history::date.asc())
            .select(DailyHistoryRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(Self::history_from_row)
            .collect()
    }

    fn get_history(&self, date: NaiveDate) -> Result<Option<DailyRecord>> {
        let mut conn = self.conn()?;
        daily_history::table
            .find(format_date(date))
            .select(DailyHistoryRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Self::history_from_row)
            .transpose()
    }
}

impl SettlementStore for SqliteStore {
    fn snapshot(&self) -> Result<Snapshot> {
        let mut conn = self.conn()?;
        // A read transaction keeps both lists on the same database state.
        conn.transaction::<_, Error, _>(|conn| {
            Ok(Snapshot {
                wagers: Self::load_wagers(conn)?,
                participants: Self::load_participants(conn)?,
            })
        })
    }

    fn commit_closure(&self, closure: &DayClosure) -> Result<()> {
        let mut conn = self.conn()?;
        let result = conn.immediate_transaction::<_, Error, _>(|conn| Self::apply_closure(conn, closure));
        match &result {
            Ok(()) => debug!(date = %closure.date(), wagers = closure.wager_ids.len(), "Committed closure"),
            Err(e) => warn!(date = %closure.date(), error = %e, "Closure transaction rolled back"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::open;
    use crate::domain::ledger::LedgerKind;
    use crate::domain::participant::Role;
    use crate::domain::wager::{WagerKind, WagerStatus};
    use rust_decimal_macros::dec;

    fn store(dir: &tempfile::TempDir) -> SqliteStore {
        let url = dir.path().join("store.db").display().to_string();
        SqliteStore::new(open(&url).unwrap())
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 9).unwrap()
    }

    #[test]
    fn wager_round_trips_losslessly() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let mut wager = Wager::try_new(
            GroupId::from("g1"),
            WagerKind::Hedge,
            dec!(2.375),
            dec!(40.50),
            day(),
            Utc::now(),
        )
        .unwrap()
        .with_notes("late goal");
        wager.resolve(WagerStatus::HalfLost).unwrap();
        wager.settled = true;
        store.save_wager(&wager).unwrap();

        let loaded = store.get_wager(&wager.id).unwrap().unwrap();
        assert_eq!(loaded.profit, Some(dec!(-20.25)));
        assert_eq!(loaded.profit.unwrap().to_string(), "-20.25");
        assert_eq!(loaded.status, WagerStatus::HalfLost);
        assert_eq!(loaded.kind, WagerKind::Hedge);
        assert!(loaded.settled);
        assert_eq!(loaded.notes, "late goal");
        assert_eq!(loaded.stake.to_string(), "40.50");
    }

    #[test]
    fn save_wager_updates_existing_row() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let mut wager =
            Wager::try_new(GroupId::new(), WagerKind::Anchor, dec!(2), dec!(10), day(), Utc::now())
                .unwrap();
        store.save_wager(&wager).unwrap();
        wager.resolve(WagerStatus::Won).unwrap();
        store.save_wager(&wager).unwrap();

        let all = store.list_wagers().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].profit, Some(dec!(10)));
    }

    #[test]
    fn transfer_is_applied_with_ledger_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let p = Participant::new("carol", Role::Investor);
        store.save_participant(&p).unwrap();

        let deposit = LedgerEntry::new(p.id.clone(), day(), dec!(300), LedgerKind::Deposit);
        store.record_transfer(&deposit).unwrap();
        let overdraw = LedgerEntry::new(p.id.clone(), day(), dec!(-301), LedgerKind::Withdrawal);
        assert!(store.record_transfer(&overdraw).is_err());

        assert_eq!(store.ledger(&p.id).unwrap(), vec![deposit]);
        assert_eq!(
            store.get_participant(&p.id).unwrap().unwrap().principal,
            dec!(300)
        );
    }

    #[test]
    fn history_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let record = DailyRecord {
            date: day(),
            turnover: dec!(80),
            gross_profit: dec!(-12.5),
            wager_count: 2,
            bank_start: dec!(1000),
            bank_end: dec!(987.5),
            net_distributed: dec!(-12.5),
            fees_collected: dec!(0),
            notes: Some("rainy".into()),
        };
        let closure = DayClosure {
            record: record.clone(),
            wager_ids: Vec::new(),
            allocations: Vec::new(),
            entries: Vec::new(),
        };
        store.commit_closure(&closure).unwrap();
        assert_eq!(store.get_history(day()).unwrap(), Some(record));
        assert!(store.commit_closure(&closure).is_err());
    }
}
