//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{daily_history, ledger_entries, participants, wagers};

/// Database row for a wager.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = wagers)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WagerRow {
    pub id: String,
    pub group_id: String,
    pub kind: String,
    pub odds: String,
    pub stake: String,
    pub status: String,
    pub settlement_date: String,
    pub event_at: String,
    pub profit: Option<String>,
    pub settled: bool,
    pub notes: String,
}

/// Database row for a participant.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = participants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ParticipantRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub principal: String,
    pub total_profit: String,
    pub active: bool,
    pub cycle_gross: String,
    pub cycle_fees: String,
    pub cycle_net: String,
}

/// Database row for a ledger entry (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = ledger_entries)]
pub struct NewLedgerRow {
    pub participant_id: String,
    pub entry_date: String,
    pub amount: String,
    pub kind: String,
}

/// Database row for a ledger entry (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = ledger_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerRow {
    pub id: Option<i32>,
    pub participant_id: String,
    pub entry_date: String,
    pub amount: String,
    pub kind: String,
}

/// Database row for a daily history record.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = daily_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DailyHistoryRow {
    pub date: String,
    pub turnover: String,
    pub gross_profit: String,
    pub wager_count: i32,
    pub bank_start: String,
    pub bank_end: String,
    pub net_distributed: String,
    pub fees_collected: String,
    pub notes: Option<String>,
}
