//! Visit History: append-only, per-day, per-vessel "first seen" log.
//! Used for reporting only; the transition engine never reads it back
//! to gate counting.

use crate::db::models::{VisitRecord, map_visit};
use crate::errors::AppResult;
use rusqlite::{Connection, params};

/// Record that a vessel was seen today. Idempotent: a repeated insert
/// for the same (day, vessel) pair is a no-op. Returns whether a row
/// actually landed.
pub fn record_first_seen(conn: &Connection, numero_jour: i64, track_id: &str) -> AppResult<bool> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO ships_seen (numero_jour, track_id) VALUES (?1, ?2)",
        params![numero_jour, track_id],
    )?;
    Ok(n > 0)
}

/// All vessels first seen on a day, in detection order.
pub fn ships_seen(conn: &Connection, numero_jour: i64) -> AppResult<Vec<VisitRecord>> {
    let mut stmt = conn.prepare(
        "SELECT numero_jour, track_id, premiere_detection
         FROM ships_seen
         WHERE numero_jour = ?1
         ORDER BY premiere_detection ASC, track_id ASC",
    )?;

    let rows = stmt.query_map([numero_jour], map_visit)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Number of distinct vessels seen on a day.
pub fn count_seen(conn: &Connection, numero_jour: i64) -> AppResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM ships_seen WHERE numero_jour = ?1",
        [numero_jour],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger;
    use crate::db::initialize::init_db;
    use chrono::NaiveDate;
    use rusqlite::Connection;

    #[test]
    fn first_seen_is_insert_once() {
        let c = Connection::open_in_memory().unwrap();
        init_db(&c).unwrap();
        let date = NaiveDate::parse_from_str("2025-06-01", "%Y-%m-%d").unwrap();
        let day = ledger::create_day(&c, date).unwrap();

        assert!(record_first_seen(&c, day.numero_jour, "T1").unwrap());
        assert!(!record_first_seen(&c, day.numero_jour, "T1").unwrap());
        assert_eq!(count_seen(&c, day.numero_jour).unwrap(), 1);

        let seen = ships_seen(&c, day.numero_jour).unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].track_id, "T1");
    }
}
