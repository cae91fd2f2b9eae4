//! Request payloads for the action-addressed counter API.
//! Wire field names follow the historic contract the map client speaks
//! (French names, camelCase identifiers).

use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use serde_json::from_slice;

#[derive(Debug, Deserialize)]
pub struct IncrementRequest {
    #[serde(rename = "trackId")]
    pub track_id: String,
    #[serde(rename = "shipName")]
    pub ship_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateZoneRequest {
    #[serde(rename = "trackIds")]
    pub track_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteDaysRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub debut: Option<i64>,
    pub fin: Option<i64>,
    pub jour: Option<i64>,
}

/// Decode a JSON request body, turning decode failures into 400s
/// before any core operation runs.
pub fn decode_body<'a, T: Deserialize<'a>>(body: &'a [u8]) -> AppResult<T> {
    if body.is_empty() {
        return Err(AppError::Validation("Empty request body".to_string()));
    }
    from_slice(body).map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))
}

/// A track id must be non-empty after trimming.
pub fn validate_track_id(track_id: &str) -> AppResult<String> {
    let trimmed = track_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("trackId required".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Every id in a snapshot must itself be a valid track id.
pub fn validate_track_ids(track_ids: &[String]) -> AppResult<Vec<String>> {
    track_ids.iter().map(|id| validate_track_id(id)).collect()
}

/// Day numbers start at 1.
pub fn validate_day_number(value: Option<i64>, field: &str) -> AppResult<i64> {
    let n = value.ok_or_else(|| AppError::Validation(format!("{field} required")))?;
    if n < 1 {
        return Err(AppError::Validation(format!(
            "Invalid {field} (must be >= 1)"
        )));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_empty_and_garbage_bodies() {
        assert!(decode_body::<IncrementRequest>(b"").is_err());
        assert!(decode_body::<IncrementRequest>(b"not json").is_err());
    }

    #[test]
    fn decode_accepts_a_valid_increment_body() {
        let req: IncrementRequest =
            decode_body(br#"{"trackId":"T1","shipName":"Boat"}"#).unwrap();
        assert_eq!(req.track_id, "T1");
        assert_eq!(req.ship_name.as_deref(), Some("Boat"));
    }

    #[test]
    fn track_id_is_trimmed_and_must_be_non_empty() {
        assert_eq!(validate_track_id("  T1 ").unwrap(), "T1");
        assert!(validate_track_id("   ").is_err());
    }

    #[test]
    fn day_numbers_below_one_are_rejected() {
        assert!(validate_day_number(Some(0), "jour").is_err());
        assert!(validate_day_number(None, "jour").is_err());
        assert_eq!(validate_day_number(Some(3), "jour").unwrap(), 3);
    }
}
