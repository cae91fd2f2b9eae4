use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure the `days` table exists.
///
/// `numero_jour` is assigned by the ledger (max + 1), never by AUTOINCREMENT,
/// so that deleted numbers are never reused and the sequence stays readable.
fn ensure_days_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS days (
            numero_jour        INTEGER PRIMARY KEY,
            date_jour          TEXT NOT NULL UNIQUE,
            compteur_passages  INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )?;
    Ok(())
}

/// Ensure the `zone_occupancy` table exists.
///
/// The composite primary key doubles as the concurrency guard: a second
/// insert for the same (day, vessel) fails with a constraint violation,
/// which the transition engine treats as "already counted".
fn ensure_occupancy_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS zone_occupancy (
            numero_jour  INTEGER NOT NULL REFERENCES days(numero_jour) ON DELETE CASCADE,
            track_id     TEXT NOT NULL,
            entree_zone  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (numero_jour, track_id)
        );

        CREATE INDEX IF NOT EXISTS idx_occupancy_day ON zone_occupancy(numero_jour);
        "#,
    )?;
    Ok(())
}

/// Ensure the `ships_seen` table exists (permanent per-day first-seen log).
fn ensure_ships_seen_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS ships_seen (
            numero_jour         INTEGER NOT NULL REFERENCES days(numero_jour) ON DELETE CASCADE,
            track_id            TEXT NOT NULL,
            premiere_detection  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (numero_jour, track_id)
        );

        CREATE INDEX IF NOT EXISTS idx_ships_seen_day ON ships_seen(numero_jour);
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let found: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(found.is_some())
}

/// Run all pending migrations. Safe to call on every startup.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_days_table(conn)?;
    ensure_occupancy_table(conn)?;
    ensure_ships_seen_table(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_create_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        assert!(table_exists(&conn, "days").unwrap());
        assert!(table_exists(&conn, "zone_occupancy").unwrap());
        assert!(table_exists(&conn, "ships_seen").unwrap());
    }

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();
    }
}
