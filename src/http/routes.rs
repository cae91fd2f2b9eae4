//! Action-addressed handlers for the counter API and the EuRIS proxy
//! route. Validation happens here, before any core operation runs; the
//! core assumes validated input.

use crate::core::purge::{PurgeMode, purge};
use crate::core::{engine, ledger, occupancy};
use crate::errors::{AppError, AppResult};
use crate::euris::{Bbox, DEFAULT_PAGE_SIZE, TracksEnvelope};
use crate::http::SharedState;
use crate::http::payloads::{
    DeleteDaysRequest, IncrementRequest, UpdateZoneRequest, decode_body, validate_day_number,
    validate_track_id, validate_track_ids,
};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use chrono::{Local, NaiveDate};
use serde_json::{Value, json};
use std::collections::HashMap;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn require_action(params: &HashMap<String, String>) -> AppResult<&str> {
    params
        .get("action")
        .map(String::as_str)
        .ok_or_else(|| AppError::Validation("action parameter required".to_string()))
}

/// GET /api/compteur?action=get_current | get_history
pub async fn compteur_get(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Value>> {
    match require_action(&params)? {
        "get_current" => get_current(&state),
        "get_history" => get_history(&state),
        other => Err(AppError::Validation(format!("Invalid action: {other}"))),
    }
}

/// POST /api/compteur?action=increment | update_zone_rouge | delete_days
pub async fn compteur_post(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> AppResult<Json<Value>> {
    match require_action(&params)? {
        "increment" => increment(&state, &body),
        "update_zone_rouge" => update_zone_rouge(&state, &body),
        "delete_days" => delete_days(&state, &body),
        other => Err(AppError::Validation(format!("Invalid action: {other}"))),
    }
}

fn get_current(state: &SharedState) -> AppResult<Json<Value>> {
    let mut db = state.lock_db()?;
    let day = engine::ensure_current_day(&mut db.conn, today())?;
    let in_zone = occupancy::track_ids(&db.conn, day.numero_jour)?;

    Ok(Json(json!({
        "success": true,
        "numero_jour": day.numero_jour,
        "date_jour": day.date_jour.format("%Y-%m-%d").to_string(),
        "compteur_passages": day.compteur_passages,
        "bateaux_zone_rouge": in_zone,
    })))
}

fn get_history(state: &SharedState) -> AppResult<Json<Value>> {
    let db = state.lock_db()?;
    let days = ledger::history(&db.conn)?;
    let total = ledger::total_passages(&db.conn)?;

    Ok(Json(json!({
        "success": true,
        "historique": days,
        "total_cumule": total,
    })))
}

fn increment(state: &SharedState, body: &[u8]) -> AppResult<Json<Value>> {
    let req: IncrementRequest = decode_body(body)?;
    let track_id = validate_track_id(&req.track_id)?;
    let ship_name = req
        .ship_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("Track {track_id}"));

    let mut db = state.lock_db()?;
    let outcome = engine::record_entry(&mut db.conn, today(), &track_id, &ship_name)?;

    if outcome.already_counted {
        return Ok(Json(json!({
            "success": true,
            "already_counted": true,
            "numero_jour": outcome.numero_jour,
            "compteur": outcome.compteur,
            "message": "Vessel already in the red zone",
        })));
    }

    Ok(Json(json!({
        "success": true,
        "numero_jour": outcome.numero_jour,
        "compteur": outcome.compteur,
        "track_id": outcome.track_id,
        "ship_name": outcome.ship_name,
        "message": "Counter incremented",
    })))
}

fn update_zone_rouge(state: &SharedState, body: &[u8]) -> AppResult<Json<Value>> {
    let req: UpdateZoneRequest = decode_body(body)?;
    let track_ids = validate_track_ids(&req.track_ids)?;

    let mut db = state.lock_db()?;
    let outcome = engine::reconcile_occupancy(&mut db.conn, today(), &track_ids)?;

    Ok(Json(json!({
        "success": true,
        "numero_jour": outcome.numero_jour,
        "bateaux_actifs": outcome.bateaux_actifs,
        "bateaux_supprimes": outcome.bateaux_supprimes,
    })))
}

fn delete_days(state: &SharedState, body: &[u8]) -> AppResult<Json<Value>> {
    let req: DeleteDaysRequest = decode_body(body)?;

    let mode = match req.kind.as_str() {
        "all" => PurgeMode::All,
        "range" => PurgeMode::Range {
            debut: validate_day_number(req.debut, "debut")?,
            fin: validate_day_number(req.fin, "fin")?,
        },
        "single" => PurgeMode::Single {
            jour: validate_day_number(req.jour, "jour")?,
        },
        _ => {
            return Err(AppError::Validation(
                "Invalid type (all, range, single)".to_string(),
            ));
        }
    };

    let mut db = state.lock_db()?;
    let outcome = purge(&mut db.conn, today(), mode)?;

    Ok(Json(json!({
        "success": true,
        "message": outcome.message,
    })))
}

/// GET /api/euris?minLat&maxLat&minLon&maxLon&pageSize with a Bearer token.
pub async fn euris_tracks(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> AppResult<Json<TracksEnvelope>> {
    let token = bearer_token(&headers)?;
    let bbox = Bbox::from_params(&params)?;
    let page_size = match params.get("pageSize") {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| AppError::Validation("Invalid pageSize".to_string()))?,
        None => DEFAULT_PAGE_SIZE,
    };

    let envelope = state.euris.tracks_by_bbox(&bbox, page_size, &token).await?;
    Ok(Json(envelope))
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> AppResult<String> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Auth("Authorization header required".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .unwrap_or_default();
    if token.is_empty() {
        return Err(AppError::Auth("Invalid token".to_string()));
    }
    Ok(token.to_string())
}
