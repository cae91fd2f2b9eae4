//! Day Ledger: the mapping from a calendar day to its sequence number
//! and cumulative passage count.

use crate::db::models::{Day, map_day};
use crate::errors::AppResult;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

/// Look up the day whose `date_jour` matches `today`, if any.
pub fn active_day(conn: &Connection, today: NaiveDate) -> AppResult<Option<Day>> {
    let mut stmt = conn.prepare(
        "SELECT numero_jour, date_jour, compteur_passages
         FROM days
         WHERE date_jour = ?1
         LIMIT 1",
    )?;

    let day = stmt
        .query_row([today.format("%Y-%m-%d").to_string()], map_day)
        .optional()?;
    Ok(day)
}

/// Highest day number recorded so far, 0 when the ledger is empty.
pub fn last_day_number(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COALESCE(MAX(numero_jour), 0) FROM days",
        [],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Insert a new day for `today` with a zero counter.
///
/// Must only be called when `active_day` returned `None`, inside the
/// ensure-current-day transaction (see the transition engine): a crash
/// between day creation and the occupancy carryover cleanup must never
/// leave a half-initialized day behind.
pub fn create_day(conn: &Connection, today: NaiveDate) -> AppResult<Day> {
    let numero_jour = last_day_number(conn)? + 1;
    let date_jour = today.format("%Y-%m-%d").to_string();

    conn.execute(
        "INSERT INTO days (numero_jour, date_jour, compteur_passages)
         VALUES (?1, ?2, 0)",
        params![numero_jour, date_jour],
    )?;

    Ok(Day {
        numero_jour,
        date_jour: today,
        compteur_passages: 0,
    })
}

/// Atomic `compteur_passages + 1`.
pub fn increment_passages(conn: &Connection, numero_jour: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE days SET compteur_passages = compteur_passages + 1
         WHERE numero_jour = ?1",
        [numero_jour],
    )?;
    Ok(())
}

/// Current counter value for a day.
pub fn passage_count(conn: &Connection, numero_jour: i64) -> AppResult<i64> {
    let count = conn.query_row(
        "SELECT compteur_passages FROM days WHERE numero_jour = ?1",
        [numero_jour],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// All days in chronological order (ascending day number).
pub fn history(conn: &Connection) -> AppResult<Vec<Day>> {
    let mut stmt = conn.prepare(
        "SELECT numero_jour, date_jour, compteur_passages
         FROM days
         ORDER BY numero_jour ASC",
    )?;

    let rows = stmt.query_map([], map_day)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Cumulative passage count across all recorded days.
pub fn total_passages(conn: &Connection) -> AppResult<i64> {
    let total = conn.query_row(
        "SELECT COALESCE(SUM(compteur_passages), 0) FROM days",
        [],
        |row| row.get(0),
    )?;
    Ok(total)
}

pub fn delete_day(conn: &Connection, numero_jour: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM days WHERE numero_jour = ?1", [numero_jour])?;
    Ok(n)
}

/// Delete days `start..=end`.
pub fn delete_range(conn: &Connection, start: i64, end: i64) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM days WHERE numero_jour >= ?1 AND numero_jour <= ?2",
        params![start, end],
    )?;
    Ok(n)
}

/// Delete every day strictly before `numero_jour`.
pub fn delete_all_before(conn: &Connection, numero_jour: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM days WHERE numero_jour < ?1", [numero_jour])?;
    Ok(n)
}
