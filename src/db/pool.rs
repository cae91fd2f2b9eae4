//! SQLite connection wrapper, explicitly constructed and dependency-injected.
//! The process entry point owns the lifecycle; no global accessor exists.

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        // Day deletions must cascade to occupancy and visit rows.
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self { conn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::migrate::table_exists;

    #[test]
    fn pool_opens_with_foreign_keys_enabled() {
        let pool = DbPool::new(":memory:").unwrap();
        let enabled: i64 = pool
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);

        init_db(&pool.conn).unwrap();
        assert!(table_exists(&pool.conn, "days").unwrap());
    }
}
