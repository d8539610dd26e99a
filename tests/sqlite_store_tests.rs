//! SQLite store persistence and atomicity.

mod support;

use hedgepool::domain::{
    Allocation, DailyRecord, DayClosure, LedgerEntry, LedgerKind, ParticipantId, WagerId, WagerStatus,
};
use hedgepool::error::{Error, SettlementError};
use hedgepool::port::outbound::{HistoryStore, ParticipantStore, SettlementStore, WagerStore};
use hedgepool::testkit::domain::{anchor, date, investor, manager, pair};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use support::TempDb;

fn record(day: chrono::NaiveDate) -> DailyRecord {
    DailyRecord {
        date: day,
        turnover: dec!(10),
        gross_profit: dec!(10),
        wager_count: 1,
        bank_start: dec!(100),
        bank_end: dec!(110),
        net_distributed: dec!(10),
        fees_collected: Decimal::ZERO,
        notes: None,
    }
}

fn allocation(participant: &ParticipantId, net: Decimal) -> Allocation {
    Allocation {
        participant_id: participant.clone(),
        share: Decimal::ONE,
        gross: net,
        fee: Decimal::ZERO,
        net,
    }
}

#[test]
fn every_status_round_trips() {
    let db = TempDb::create();
    let store = db.store();
    let day = date(2026, 9, 1);
    let statuses = [
        WagerStatus::Won,
        WagerStatus::HalfWon,
        WagerStatus::Lost,
        WagerStatus::HalfLost,
        WagerStatus::Void,
    ];
    let saved: Vec<_> = statuses
        .iter()
        .map(|s| anchor(dec!(1.95), dec!(33.33), *s, day))
        .collect();
    for w in &saved {
        store.save_wager(w).unwrap();
    }

    for w in &saved {
        let loaded = store.get_wager(&w.id).unwrap().unwrap();
        assert_eq!(loaded.status, w.status);
        assert_eq!(loaded.profit, w.profit);
        assert_eq!(loaded.event_at, w.event_at);
    }
}

#[test]
fn participant_keeps_signed_totals_and_role() {
    let db = TempDb::create();
    let store = db.store();
    let mut p = manager("boss").with_active(false);
    p.total_profit = dec!(-12.345678);
    p.cycle.net = dec!(-0.000001);
    store.save_participant(&p).unwrap();

    assert_eq!(store.get_participant(&p.id).unwrap(), Some(p));
}

#[test]
fn list_wagers_is_ordered_by_date() {
    let db = TempDb::create();
    let store = db.store();
    let late = anchor(dec!(2), dec!(1), WagerStatus::Won, date(2026, 9, 3));
    let early = anchor(dec!(2), dec!(1), WagerStatus::Won, date(2026, 9, 2));
    store.save_wager(&late).unwrap();
    store.save_wager(&early).unwrap();

    let ids: Vec<_> = store.list_wagers().unwrap().into_iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![early.id, late.id]);
}

#[test]
fn withdrawal_beyond_principal_leaves_nothing_behind() {
    let db = TempDb::create();
    let store = db.store();
    let p = investor("dave", dec!(0));
    store.save_participant(&p).unwrap();
    store
        .record_transfer(&LedgerEntry::new(p.id.clone(), date(2026, 9, 1), dec!(50), LedgerKind::Deposit))
        .unwrap();

    let err = store
        .record_transfer(&LedgerEntry::new(p.id.clone(), date(2026, 9, 2), dec!(-80), LedgerKind::Withdrawal))
        .unwrap_err();
    assert!(matches!(err, Error::Domain(_)));
    assert_eq!(store.ledger(&p.id).unwrap().len(), 1);
    assert_eq!(store.get_participant(&p.id).unwrap().unwrap().principal, dec!(50));
}

#[test]
fn transfer_to_unknown_participant_fails() {
    let db = TempDb::create();
    let store = db.store();
    let entry = LedgerEntry::new(ParticipantId::from("ghost"), date(2026, 9, 1), dec!(5), LedgerKind::Deposit);
    assert!(matches!(
        store.record_transfer(&entry),
        Err(Error::Settlement(SettlementError::UnknownParticipant(_)))
    ));
}

#[test]
fn commit_with_settled_wager_rolls_back_everything() {
    let db = TempDb::create();
    let store = db.store();
    let day = date(2026, 9, 4);
    let p = investor("erin", dec!(100));
    store.save_participant(&p).unwrap();
    let fresh = anchor(dec!(2), dec!(10), WagerStatus::Won, day);
    let mut already = anchor(dec!(2), dec!(10), WagerStatus::Won, day);
    already.settled = true;
    store.save_wager(&fresh).unwrap();
    store.save_wager(&already).unwrap();

    let closure = DayClosure {
        record: record(day),
        wager_ids: vec![fresh.id.clone(), already.id.clone()],
        allocations: vec![allocation(&p.id, dec!(10))],
        entries: vec![LedgerEntry::new(p.id.clone(), day, dec!(10), LedgerKind::ProfitPayout)],
    };
    let err = store.commit_closure(&closure).unwrap_err();
    assert!(matches!(
        err,
        Error::Settlement(SettlementError::AlreadySettled { conflicting: 1, .. })
    ));

    assert!(!store.get_wager(&fresh.id).unwrap().unwrap().settled);
    assert!(store.ledger(&p.id).unwrap().is_empty());
    assert_eq!(store.get_participant(&p.id).unwrap().unwrap().total_profit, Decimal::ZERO);
    assert_eq!(store.get_history(day).unwrap(), None);
}

#[test]
fn commit_with_unknown_participant_rolls_back_flags() {
    let db = TempDb::create();
    let store = db.store();
    let day = date(2026, 9, 5);
    let (a, h) = pair(
        (dec!(2), dec!(10), WagerStatus::Won),
        (dec!(2), dec!(10), WagerStatus::Lost),
        day,
    );
    store.save_wager(&a).unwrap();
    store.save_wager(&h).unwrap();

    let ghost = ParticipantId::from("ghost");
    let closure = DayClosure {
        record: record(day),
        wager_ids: vec![a.id.clone(), h.id.clone()],
        allocations: vec![allocation(&ghost, dec!(10))],
        entries: Vec::new(),
    };
    assert!(matches!(
        store.commit_closure(&closure),
        Err(Error::Settlement(SettlementError::UnknownParticipant(_)))
    ));
    assert!(store.list_wagers().unwrap().iter().all(|w| !w.settled));
    assert!(store.list_history().unwrap().is_empty());
}

#[test]
fn commit_with_unknown_wager_fails() {
    let db = TempDb::create();
    let store = db.store();
    let day = date(2026, 9, 6);
    let closure = DayClosure {
        record: record(day),
        wager_ids: vec![WagerId::from("missing")],
        allocations: Vec::new(),
        entries: Vec::new(),
    };
    assert!(matches!(
        store.commit_closure(&closure),
        Err(Error::Settlement(SettlementError::UnknownWager(_)))
    ));
}

#[test]
fn data_survives_reopen() {
    let db = TempDb::create();
    let day = date(2026, 9, 7);
    let p = investor("frank", dec!(250.50));
    let w = anchor(dec!(3.25), dec!(12.5), WagerStatus::HalfLost, day);
    {
        let store = db.store();
        store.save_participant(&p).unwrap();
        store.save_wager(&w).unwrap();
    }

    let reopened = db.second_process_store();
    assert_eq!(reopened.get_participant(&p.id).unwrap(), Some(p));
    assert_eq!(reopened.get_wager(&w.id).unwrap().unwrap().profit, Some(dec!(-6.25)));
}
