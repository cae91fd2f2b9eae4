//! Occupancy Tracker: the set of vessels currently inside the red zone
//! for a given day. Existence here means "currently inside", not "ever
//! inside" — the permanent log lives in the visit history.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, params};

/// Insert a vessel into the active occupancy set.
///
/// Deliberately a plain INSERT: the (numero_jour, track_id) primary key
/// makes a duplicate fail with a constraint violation, which the caller
/// treats as "already inside". That insert failure is the concurrency
/// guard against double counting, not a prior existence check.
pub fn insert(conn: &Connection, numero_jour: i64, track_id: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO zone_occupancy (numero_jour, track_id) VALUES (?1, ?2)",
        params![numero_jour, track_id],
    )
    .map_err(AppError::Db)?;
    Ok(())
}

/// Remove one vessel from the day's occupancy set.
pub fn remove(conn: &Connection, numero_jour: i64, track_id: &str) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM zone_occupancy WHERE numero_jour = ?1 AND track_id = ?2",
        params![numero_jour, track_id],
    )?;
    Ok(n)
}

/// Track ids currently in the zone for a day, oldest entry first.
pub fn track_ids(conn: &Connection, numero_jour: i64) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT track_id FROM zone_occupancy
         WHERE numero_jour = ?1
         ORDER BY entree_zone ASC, track_id ASC",
    )?;

    let rows = stmt.query_map([numero_jour], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Clear the whole occupancy set for one day.
pub fn clear_day(conn: &Connection, numero_jour: i64) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM zone_occupancy WHERE numero_jour = ?1",
        [numero_jour],
    )?;
    Ok(n)
}

/// Purge stale occupancy from every day before `numero_jour`.
/// Runs at day rollover: the zone is assumed physically empty at the
/// day boundary in the absence of a continuous ground-truth feed.
pub fn clear_before(conn: &Connection, numero_jour: i64) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM zone_occupancy WHERE numero_jour < ?1",
        [numero_jour],
    )?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger;
    use crate::db::initialize::init_db;
    use chrono::NaiveDate;
    use rusqlite::Connection;

    fn conn_with_day() -> (Connection, i64) {
        let c = Connection::open_in_memory().unwrap();
        init_db(&c).unwrap();
        let date = NaiveDate::parse_from_str("2025-06-01", "%Y-%m-%d").unwrap();
        let day = ledger::create_day(&c, date).unwrap();
        (c, day.numero_jour)
    }

    #[test]
    fn duplicate_insert_is_a_constraint_violation() {
        let (c, day) = conn_with_day();
        insert(&c, day, "T1").unwrap();
        let err = insert(&c, day, "T1").unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[test]
    fn clear_before_leaves_the_new_day_alone() {
        let c = Connection::open_in_memory().unwrap();
        init_db(&c).unwrap();
        let d1 = NaiveDate::parse_from_str("2025-06-01", "%Y-%m-%d").unwrap();
        let d2 = NaiveDate::parse_from_str("2025-06-02", "%Y-%m-%d").unwrap();
        let day1 = ledger::create_day(&c, d1).unwrap();
        let day2 = ledger::create_day(&c, d2).unwrap();

        insert(&c, day1.numero_jour, "OLD").unwrap();
        insert(&c, day2.numero_jour, "NEW").unwrap();

        clear_before(&c, day2.numero_jour).unwrap();

        assert!(track_ids(&c, day1.numero_jour).unwrap().is_empty());
        assert_eq!(track_ids(&c, day2.numero_jour).unwrap(), vec!["NEW"]);
    }
}
