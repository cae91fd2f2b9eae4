//! Normalization of raw EuRIS track records into the flat shape the
//! map client consumes. Upstream field names are short codes (sog, cog,
//! inlen, inbm, st, posTS); records missing coordinates or an
//! identifier are dropped.

use serde::Serialize;
use serde_json::Value;

/// One normalized vessel track.
#[derive(Debug, Clone, Serialize)]
pub struct Track {
    #[serde(rename = "trackId")]
    pub track_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    #[serde(rename = "positionISRS")]
    pub position_isrs: Option<String>,
    #[serde(rename = "positionName")]
    pub position_name: Option<String>,

    pub speed: Option<f64>,
    pub course: Option<f64>,
    pub moving: Option<bool>,
    pub status: Option<i64>,

    pub length: Option<f64>,
    pub width: Option<f64>,
    #[serde(rename = "dimA")]
    pub dim_a: Option<i64>,
    #[serde(rename = "dimB")]
    pub dim_b: Option<i64>,
    #[serde(rename = "dimC")]
    pub dim_c: Option<i64>,
    #[serde(rename = "dimD")]
    pub dim_d: Option<i64>,

    pub timestamp: Option<String>,
}

/// Normalize a batch of raw tracks, dropping the invalid ones.
pub fn normalize_tracks(raw: &[Value]) -> Vec<Track> {
    raw.iter().filter_map(normalize_track).collect()
}

/// A track is only usable with an identifier and both coordinates.
fn normalize_track(raw: &Value) -> Option<Track> {
    let track_id = string_field(raw, "trackID")?;
    let latitude = f64_field(raw, "lat")?;
    let longitude = f64_field(raw, "lon")?;

    let name = string_field(raw, "name").unwrap_or_else(|| format!("Track {track_id}"));

    Some(Track {
        track_id,
        name,
        latitude,
        longitude,
        position_isrs: string_field(raw, "positionISRS"),
        position_name: string_field(raw, "positionISRSName"),
        speed: f64_field(raw, "sog"),
        course: f64_field(raw, "cog"),
        moving: raw.get("moving").and_then(Value::as_bool),
        status: i64_field(raw, "st"),
        length: f64_field(raw, "inlen"),
        width: f64_field(raw, "inbm"),
        dim_a: i64_field(raw, "dimA"),
        dim_b: i64_field(raw, "dimB"),
        dim_c: i64_field(raw, "dimC"),
        dim_d: i64_field(raw, "dimD"),
        timestamp: string_field(raw, "posTS"),
    })
}

/// Track identifiers arrive as either JSON strings or numbers.
fn string_field(v: &Value, key: &str) -> Option<String> {
    match v.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn f64_field(v: &Value, key: &str) -> Option<f64> {
    v.get(key).and_then(Value::as_f64)
}

fn i64_field(v: &Value, key: &str) -> Option<i64> {
    v.get(key).and_then(Value::as_i64)
}
