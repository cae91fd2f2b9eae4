//! Zone Transition Engine.
//!
//! Reconciles a point-in-time "vessels currently detected in zone"
//! snapshot against persisted occupancy, and updates the day counter
//! exactly once per genuine entry. Occupancy membership is the entry
//! gate: a vessel lingering across many poll cycles is counted once,
//! on the poll that first saw it inside.

use crate::core::{ledger, occupancy, visits};
use crate::db::models::Day;
use crate::errors::AppResult;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::HashSet;
use tracing::info;

/// Result of a `record_entry` call.
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub numero_jour: i64,
    pub compteur: i64,
    pub track_id: String,
    pub ship_name: String,
    pub already_counted: bool,
}

/// Result of a `reconcile_occupancy` call.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub numero_jour: i64,
    pub bateaux_actifs: Vec<String>,
    pub bateaux_supprimes: Vec<String>,
}

/// Make sure a day row exists for `today`, creating one at rollover.
///
/// Creation and the stale-occupancy purge run in one transaction: a
/// crash between the two must not leave a new day with a dirty
/// occupancy set carried over from yesterday.
pub fn ensure_current_day(conn: &mut Connection, today: NaiveDate) -> AppResult<Day> {
    if let Some(day) = ledger::active_day(conn, today)? {
        return Ok(day);
    }

    let tx = conn.transaction()?;
    let day = ledger::create_day(&tx, today)?;
    let purged = occupancy::clear_before(&tx, day.numero_jour)?;
    tx.commit()?;

    info!(
        numero_jour = day.numero_jour,
        date_jour = %day.date_jour,
        stale_occupancy_purged = purged,
        "day rollover: new monitoring day created"
    );
    Ok(day)
}

/// Count a vessel entering the red zone.
///
/// The occupancy insert runs first, inside the transaction; its unique
/// constraint is the idempotence guard. If the row already exists the
/// counter is untouched and the outcome carries `already_counted`.
/// Otherwise counter increment, occupancy insert and first-seen log all
/// commit together, and the fresh counter value is read back.
pub fn record_entry(
    conn: &mut Connection,
    today: NaiveDate,
    track_id: &str,
    ship_name: &str,
) -> AppResult<EntryOutcome> {
    let day = ensure_current_day(conn, today)?;

    let tx = conn.transaction()?;

    if let Err(e) = occupancy::insert(&tx, day.numero_jour, track_id) {
        if e.is_unique_violation() {
            // Vessel is still inside from a previous poll cycle.
            let compteur = ledger::passage_count(&tx, day.numero_jour)?;
            return Ok(EntryOutcome {
                numero_jour: day.numero_jour,
                compteur,
                track_id: track_id.to_string(),
                ship_name: ship_name.to_string(),
                already_counted: true,
            });
        }
        return Err(e);
    }

    ledger::increment_passages(&tx, day.numero_jour)?;
    visits::record_first_seen(&tx, day.numero_jour, track_id)?;
    let compteur = ledger::passage_count(&tx, day.numero_jour)?;
    tx.commit()?;

    info!(
        numero_jour = day.numero_jour,
        track_id,
        compteur,
        "vessel entered the red zone"
    );

    Ok(EntryOutcome {
        numero_jour: day.numero_jour,
        compteur,
        track_id: track_id.to_string(),
        ship_name: ship_name.to_string(),
        already_counted: false,
    })
}

/// Align stored occupancy with the latest poll snapshot.
///
/// Removal-only: vessels absent from the snapshot are dropped, vessels
/// present but not yet stored are left for the caller's `record_entry`
/// pass. An empty snapshot clears the whole set — an empty poll is
/// treated as "zone empty", not as "no data".
pub fn reconcile_occupancy(
    conn: &mut Connection,
    today: NaiveDate,
    active_ids: &[String],
) -> AppResult<ReconcileOutcome> {
    let day = ensure_current_day(conn, today)?;

    let stored = occupancy::track_ids(conn, day.numero_jour)?;
    let active: HashSet<&str> = active_ids.iter().map(String::as_str).collect();
    let to_remove: Vec<String> = stored
        .into_iter()
        .filter(|id| !active.contains(id.as_str()))
        .collect();

    if !to_remove.is_empty() {
        let tx = conn.transaction()?;
        if active_ids.is_empty() {
            occupancy::clear_day(&tx, day.numero_jour)?;
        } else {
            for id in &to_remove {
                occupancy::remove(&tx, day.numero_jour, id)?;
            }
        }
        tx.commit()?;

        info!(
            numero_jour = day.numero_jour,
            removed = to_remove.len(),
            "vessels left the red zone"
        );
    }

    Ok(ReconcileOutcome {
        numero_jour: day.numero_jour,
        bateaux_actifs: active_ids.to_vec(),
        bateaux_supprimes: to_remove,
    })
}
