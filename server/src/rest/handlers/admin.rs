//! REST-Handler fuer Admin-Endpunkte
//!
//! Die geschuetzten Routen verlangen den [`AdminClaims`]-Extractor; ein
//! Token ohne Admin-Anspruch kommt nie bis in den Handler.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use gatehouse_core::{KontoStatus, StatusAktion};
use gatehouse_db::models::BenutzerRecord;

use crate::rest::middleware::{fehler_antwort, AdminClaims};
use crate::rest::{fehler_in_antwort, GatehouseState};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AdminAnmeldenBody {
    pub username: String,
    pub password: String,
}

/// POST /admin/login
pub async fn login(
    State(state): State<GatehouseState>,
    Json(body): Json<AdminAnmeldenBody>,
) -> Response {
    match state
        .auth
        .admin_anmelden(&body.username, &body.password)
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

/// Wire-Darstellung eines wartenden Benutzers (ohne Passwort-Hash)
#[derive(Debug, Serialize)]
pub struct WartenderBenutzer {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub status: KontoStatus,
    pub created_at: DateTime<Utc>,
}

impl From<BenutzerRecord> for WartenderBenutzer {
    fn from(record: BenutzerRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

/// GET /admin/pending-users
pub async fn pending_users(
    _claims: AdminClaims,
    State(state): State<GatehouseState>,
) -> Response {
    match state.auth.ausstehende_benutzer().await {
        Ok(benutzer) => {
            let wartende: Vec<WartenderBenutzer> =
                benutzer.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(wartende)).into_response()
        }
        Err(e) => fehler_in_antwort(e),
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AktionBody {
    pub action: String,
}

/// PATCH /admin/user/:id/status
pub async fn set_status(
    _claims: AdminClaims,
    State(state): State<GatehouseState>,
    Path(id): Path<String>,
    Json(body): Json<AktionBody>,
) -> Response {
    // Eine nicht parsbare ID kann nie zu einer Zeile passen
    let Ok(user_id) = Uuid::parse_str(&id) else {
        return fehler_antwort(StatusCode::NOT_FOUND, "User not found.");
    };

    match state.auth.status_setzen(user_id, &body.action).await {
        Ok(aktion) => {
            let nachricht = match aktion {
                StatusAktion::Approve => "User approved.",
                StatusAktion::Reject => "User rejected.",
            };
            (StatusCode::OK, Json(json!({ "message": nachricht }))).into_response()
        }
        Err(e) => fehler_in_antwort(e),
    }
}
