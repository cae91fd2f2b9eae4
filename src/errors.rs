//! Unified application error type.
//! All modules (db, core, http, euris) return AppError to keep the error
//! handling consistent and easy to manage. The HTTP layer maps each kind
//! to a status code; persistence details never reach the response body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Request validation
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    // ---------------------------
    // EuRIS upstream
    // ---------------------------
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Failed to reach EuRIS API: {0}")]
    Request(#[from] reqwest::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Upstream { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                message.clone(),
            ),
            AppError::Request(e) => {
                tracing::error!(error = %e, "EuRIS request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to reach EuRIS API".to_string(),
                )
            }
            // Never leak SQL text or file paths to the client.
            AppError::Db(e) => {
                tracing::error!(error = %e, "database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "success": false, "error": message }));
        (status, body).into_response()
    }
}

impl AppError {
    /// True when the underlying SQLite error is a UNIQUE/PRIMARY KEY violation.
    /// The occupancy insert relies on this as its idempotence guard.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            AppError::Db(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}
