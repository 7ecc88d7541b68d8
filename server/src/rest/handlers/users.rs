//! REST-Handler fuer Benutzer-Endpunkte

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::rest::{fehler_in_antwort, GatehouseState};

// Alle Body-Felder mit serde-Default: fehlende Felder werden zu leeren
// Strings und laufen in die 400-Validierung statt in eine 422-Ablehnung.

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RegistrierenBody {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// POST /users/register
pub async fn register(
    State(state): State<GatehouseState>,
    Json(body): Json<RegistrierenBody>,
) -> Response {
    match state
        .auth
        .registrieren(&body.username, &body.email, &body.password)
        .await
    {
        Ok(_) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Registration successful. Awaiting approval." })),
        )
            .into_response(),
        Err(e) => fehler_in_antwort(e),
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AnmeldenBody {
    pub username: String,
    pub password: String,
}

/// POST /users/login
pub async fn login(
    State(state): State<GatehouseState>,
    Json(body): Json<AnmeldenBody>,
) -> Response {
    match state
        .auth
        .benutzer_anmelden(&body.username, &body.password)
        .await
    {
        Ok(anmeldung) => (
            StatusCode::OK,
            Json(json!({
                "token": anmeldung.token,
                "username": anmeldung.username,
                "email": anmeldung.email,
            })),
        )
            .into_response(),
        Err(e) => fehler_in_antwort(e),
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct StatusQuery {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// GET /users/status?username=... oder ?email=...
pub async fn status(
    State(state): State<GatehouseState>,
    Query(query): Query<StatusQuery>,
) -> Response {
    match state
        .auth
        .status_abfragen(query.username.as_deref(), query.email.as_deref())
        .await
    {
        Ok(auskunft) => (
            StatusCode::OK,
            Json(json!({
                "username": auskunft.username,
                "email": auskunft.email,
                "status": auskunft.status,
            })),
        )
            .into_response(),
        Err(e) => fehler_in_antwort(e),
    }
}
