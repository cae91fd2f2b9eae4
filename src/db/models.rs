//! Database row models for monitoring days and visit history.
//! These are thin wrappers around SQLite rows. The occupancy set has no
//! row model: its consumers only ever need the bare track ids.

use chrono::NaiveDate;
use rusqlite::Row;
use serde::Serialize;

/// One calendar day of monitoring.
#[derive(Debug, Clone, Serialize)]
pub struct Day {
    pub numero_jour: i64,
    pub date_jour: NaiveDate,
    pub compteur_passages: i64,
}

/// Permanent record that a vessel was first seen on a given day.
#[derive(Debug, Clone, Serialize)]
pub struct VisitRecord {
    pub numero_jour: i64,
    pub track_id: String,
    pub premiere_detection: String,
}

pub fn map_day(row: &Row) -> rusqlite::Result<Day> {
    let date_str: String = row.get("date_jour")?;
    let date_jour = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;

    Ok(Day {
        numero_jour: row.get("numero_jour")?,
        date_jour,
        compteur_passages: row.get("compteur_passages")?,
    })
}

pub fn map_visit(row: &Row) -> rusqlite::Result<VisitRecord> {
    Ok(VisitRecord {
        numero_jour: row.get("numero_jour")?,
        track_id: row.get("track_id")?,
        premiere_detection: row.get("premiere_detection")?,
    })
}
