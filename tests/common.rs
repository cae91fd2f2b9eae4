#![allow(dead_code)]
use chrono::NaiveDate;
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_trackship.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Open a fresh, initialized database for a test
pub fn open_db(name: &str) -> Connection {
    let path = setup_test_db(name);
    let conn = Connection::open(&path).expect("open db");
    conn.pragma_update(None, "foreign_keys", true)
        .expect("enable foreign keys");
    trackship::db::initialize::init_db(&conn).expect("init db");
    conn
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// Seed days 1..=4 with earlier dates, then day 5 for `2025-06-05`
/// carrying a passage count of 3. Returns day 5's number.
pub fn seed_day_five_with_three_passages(conn: &Connection) -> i64 {
    use trackship::core::ledger;

    for i in 1..=4 {
        ledger::create_day(conn, date(&format!("2025-06-0{i}"))).expect("seed day");
    }
    let day5 = ledger::create_day(conn, date("2025-06-05")).expect("seed day 5");
    for _ in 0..3 {
        ledger::increment_passages(conn, day5.numero_jour).expect("seed counter");
    }
    day5.numero_jour
}
