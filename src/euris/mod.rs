//! Thin EuRIS proxy collaborator: bounding-box validation, upstream
//! fetch with a fixed timeout, HTTP error mapping and track
//! normalization for the browser map client.

pub mod normalize;

use crate::errors::{AppError, AppResult};
use chrono::Local;
use normalize::{Track, normalize_tracks};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.eurisportal.eu/visuris/api/TracksV2";
pub const DEFAULT_PAGE_SIZE: u32 = 100;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Geographic bounding box for a track query.
#[derive(Debug, Clone, Copy)]
pub struct Bbox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bbox {
    /// Parse and validate bbox query parameters.
    pub fn from_params(params: &HashMap<String, String>) -> AppResult<Self> {
        let get = |key: &str| -> AppResult<f64> {
            let raw = params.get(key).ok_or_else(|| {
                AppError::Validation(
                    "Missing parameters: minLat, maxLat, minLon, maxLon required".to_string(),
                )
            })?;
            raw.parse::<f64>()
                .map_err(|_| AppError::Validation(format!("Invalid value for {key}")))
        };

        let bbox = Bbox {
            min_lat: get("minLat")?,
            max_lat: get("maxLat")?,
            min_lon: get("minLon")?,
            max_lon: get("maxLon")?,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    fn validate(&self) -> AppResult<()> {
        let lat_ok = |v: f64| (-90.0..=90.0).contains(&v);
        let lon_ok = |v: f64| (-180.0..=180.0).contains(&v);

        if !lat_ok(self.min_lat) || !lat_ok(self.max_lat) {
            return Err(AppError::Validation(
                "Invalid latitude (must be between -90 and 90)".to_string(),
            ));
        }
        if !lon_ok(self.min_lon) || !lon_ok(self.max_lon) {
            return Err(AppError::Validation(
                "Invalid longitude (must be between -180 and 180)".to_string(),
            ));
        }
        if self.min_lat >= self.max_lat {
            return Err(AppError::Validation(
                "minLat must be lower than maxLat".to_string(),
            ));
        }
        if self.min_lon >= self.max_lon {
            return Err(AppError::Validation(
                "minLon must be lower than maxLon".to_string(),
            ));
        }
        Ok(())
    }
}

/// Response envelope returned to the map client.
#[derive(Debug, Serialize)]
pub struct TracksEnvelope {
    pub tracks: Vec<Track>,
    #[serde(rename = "_metadata")]
    pub metadata: Metadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub timestamp: String,
    pub source: &'static str,
    pub track_count: usize,
    pub total_received: usize,
}

#[derive(Clone)]
pub struct EurisClient {
    client: reqwest::Client,
    base_url: String,
}

impl EurisClient {
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch and normalize the tracks inside a bounding box, forwarding
    /// the caller's bearer token to EuRIS.
    pub async fn tracks_by_bbox(
        &self,
        bbox: &Bbox,
        page_size: u32,
        token: &str,
    ) -> AppResult<TracksEnvelope> {
        let url = format!("{}/GetTracksByBBoxV2", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("minLat", format!("{:.6}", bbox.min_lat)),
                ("maxLat", format!("{:.6}", bbox.max_lat)),
                ("minLon", format!("{:.6}", bbox.min_lon)),
                ("maxLon", format!("{:.6}", bbox.max_lon)),
                ("pageSize", page_size.to_string()),
            ])
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: map_upstream_status(status.as_u16()).to_string(),
            });
        }

        let raw: Vec<Value> = response.json().await.map_err(|_| AppError::Upstream {
            status: 502,
            message: "Invalid response from the EuRIS API".to_string(),
        })?;

        let tracks = normalize_tracks(&raw);
        let metadata = Metadata {
            timestamp: Local::now().to_rfc3339(),
            source: "EuRIS API",
            track_count: tracks.len(),
            total_received: raw.len(),
        };

        Ok(TracksEnvelope { tracks, metadata })
    }
}

/// Human messages for the upstream error codes the EuRIS API returns.
fn map_upstream_status(code: u16) -> &'static str {
    match code {
        401 => "Authentication token invalid or expired",
        403 => "Access forbidden - insufficient permissions",
        404 => "EuRIS service not found",
        429 => "Too many requests - wait before retrying",
        500 | 502 => "EuRIS service temporarily unavailable",
        503 => "EuRIS service under maintenance",
        504 => "Gateway timeout reached",
        _ => "EuRIS API error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn bbox_requires_all_four_corners() {
        let p = params(&[("minLat", "48.0"), ("maxLat", "49.0"), ("minLon", "7.0")]);
        assert!(Bbox::from_params(&p).is_err());
    }

    #[test]
    fn bbox_rejects_inverted_bounds() {
        let p = params(&[
            ("minLat", "49.0"),
            ("maxLat", "48.0"),
            ("minLon", "7.0"),
            ("maxLon", "8.0"),
        ]);
        assert!(Bbox::from_params(&p).is_err());
    }

    #[test]
    fn bbox_rejects_out_of_range_latitude() {
        let p = params(&[
            ("minLat", "-91.0"),
            ("maxLat", "49.0"),
            ("minLon", "7.0"),
            ("maxLon", "8.0"),
        ]);
        assert!(Bbox::from_params(&p).is_err());
    }

    #[test]
    fn bbox_accepts_a_valid_box() {
        let p = params(&[
            ("minLat", "48.0"),
            ("maxLat", "49.0"),
            ("minLon", "7.0"),
            ("maxLon", "8.0"),
        ]);
        let bbox = Bbox::from_params(&p).unwrap();
        assert_eq!(bbox.min_lat, 48.0);
        assert_eq!(bbox.max_lon, 8.0);
    }

    #[test]
    fn upstream_codes_map_to_human_messages() {
        assert!(map_upstream_status(401).contains("token"));
        assert!(map_upstream_status(503).contains("maintenance"));
        assert_eq!(map_upstream_status(418), "EuRIS API error");
    }
}
