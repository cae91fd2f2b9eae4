//! History Purge: administrator-requested deletion of past day records.
//! The active day is always protected; child occupancy and visit rows
//! follow their day via the foreign-key cascade.

use crate::core::ledger;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeMode {
    /// Every day before the active one.
    All,
    /// Days `debut..=fin`, both strictly before the active day.
    Range { debut: i64, fin: i64 },
    /// One day, strictly before the active one.
    Single { jour: i64 },
}

#[derive(Debug, Clone)]
pub struct PurgeOutcome {
    pub message: String,
}

/// Delete historical days per `mode`.
///
/// When no day matches `today` the protected number falls back to a
/// sentinel above any real day: nothing is protected, but a number that
/// does not exist cannot be deleted either.
pub fn purge(conn: &mut Connection, today: NaiveDate, mode: PurgeMode) -> AppResult<PurgeOutcome> {
    let current = ledger::active_day(conn, today)?
        .map(|d| d.numero_jour)
        .unwrap_or(i64::MAX);

    let message = match mode {
        PurgeMode::All => {
            let tx = conn.transaction()?;
            ledger::delete_all_before(&tx, current)?;
            tx.commit()?;
            "All history has been cleared".to_string()
        }
        PurgeMode::Range { debut, fin } => {
            if debut >= current || fin >= current {
                warn!(debut, fin, current, "purge rejected: range reaches the active day");
                return Err(AppError::Validation(
                    "Cannot delete the current or a future day".to_string(),
                ));
            }
            let tx = conn.transaction()?;
            ledger::delete_range(&tx, debut, fin)?;
            tx.commit()?;
            format!("Days {debut} to {fin} deleted")
        }
        PurgeMode::Single { jour } => {
            if jour >= current {
                warn!(jour, current, "purge rejected: targets the active day");
                return Err(AppError::Validation(
                    "Cannot delete the current or a future day".to_string(),
                ));
            }
            let tx = conn.transaction()?;
            ledger::delete_day(&tx, jour)?;
            tx.commit()?;
            format!("Day {jour} deleted")
        }
    };

    Ok(PurgeOutcome { message })
}
