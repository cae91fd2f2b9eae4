mod common;

use common::{date, open_db, seed_day_five_with_three_passages};
use trackship::core::purge::{PurgeMode, purge};
use trackship::core::{engine, ledger, visits};

#[test]
fn purge_single_refuses_the_active_day() {
    let mut conn = open_db("purge_single_active");
    let today = date("2025-06-05");
    seed_day_five_with_three_passages(&conn);

    let err = purge(&mut conn, today, PurgeMode::Single { jour: 5 }).unwrap_err();
    assert!(err.to_string().contains("current"));
    assert_eq!(ledger::history(&conn).unwrap().len(), 5);
}

#[test]
fn purge_single_removes_a_past_day() {
    let mut conn = open_db("purge_single_past");
    let today = date("2025-06-05");
    seed_day_five_with_three_passages(&conn);

    purge(&mut conn, today, PurgeMode::Single { jour: 2 }).unwrap();

    let numbers: Vec<i64> = ledger::history(&conn)
        .unwrap()
        .iter()
        .map(|d| d.numero_jour)
        .collect();
    assert_eq!(numbers, vec![1, 3, 4, 5]);
}

#[test]
fn purge_range_rejects_ranges_reaching_the_active_day() {
    let mut conn = open_db("purge_range_active");
    let today = date("2025-06-05");
    seed_day_five_with_three_passages(&conn);

    assert!(purge(&mut conn, today, PurgeMode::Range { debut: 1, fin: 5 }).is_err());
    assert!(purge(&mut conn, today, PurgeMode::Range { debut: 5, fin: 9 }).is_err());
    assert_eq!(ledger::history(&conn).unwrap().len(), 5);
}

#[test]
fn purge_range_removes_days_one_to_four() {
    let mut conn = open_db("purge_range_past");
    let today = date("2025-06-05");
    seed_day_five_with_three_passages(&conn);

    purge(&mut conn, today, PurgeMode::Range { debut: 1, fin: 4 }).unwrap();

    let numbers: Vec<i64> = ledger::history(&conn)
        .unwrap()
        .iter()
        .map(|d| d.numero_jour)
        .collect();
    assert_eq!(numbers, vec![5]);
}

#[test]
fn purge_all_keeps_only_the_active_day() {
    let mut conn = open_db("purge_all");
    let today = date("2025-06-05");
    seed_day_five_with_three_passages(&conn);

    purge(&mut conn, today, PurgeMode::All).unwrap();

    let days = ledger::history(&conn).unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].numero_jour, 5);
    assert_eq!(days[0].compteur_passages, 3);
}

#[test]
fn purge_cascades_to_visit_history() {
    let mut conn = open_db("purge_cascade");

    engine::record_entry(&mut conn, date("2025-06-01"), "T1", "Boat1").unwrap();
    engine::ensure_current_day(&mut conn, date("2025-06-02")).unwrap();

    assert_eq!(visits::count_seen(&conn, 1).unwrap(), 1);
    purge(&mut conn, date("2025-06-02"), PurgeMode::Single { jour: 1 }).unwrap();
    assert_eq!(visits::count_seen(&conn, 1).unwrap(), 0);
}

#[test]
fn purge_all_with_no_active_day_clears_everything() {
    let mut conn = open_db("purge_no_active_day");

    // Days exist but none matches today: the sentinel protects nothing,
    // and "all" deletes every number below it, so every real day goes.
    seed_day_five_with_three_passages(&conn);
    purge(&mut conn, date("2025-07-01"), PurgeMode::All).unwrap();
    assert!(ledger::history(&conn).unwrap().is_empty());
}
