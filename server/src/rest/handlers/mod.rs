//! REST-Handler fuer Gatehouse

pub mod admin;
pub mod users;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

/// GET /health – Health-Check-Endpunkt
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
