//! Axum-Middleware: Bearer-Token-Extraktion und Admin-Schutz

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use gatehouse_auth::Claims;

use crate::rest::GatehouseState;

/// Fehlerantwort fuer die REST-API: {"error": "<nachricht>"}
pub fn fehler_antwort(status: StatusCode, nachricht: &str) -> Response {
    (status, Json(json!({ "error": nachricht }))).into_response()
}

/// Extrahiert den Bearer-Token aus dem Authorization-Header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Extractor fuer Admin-geschuetzte Routen
///
/// Lehnt ab bevor der Handler laeuft: fehlender Token (401), nicht
/// pruefbarer Token (401) und gueltiger Token ohne Admin-Anspruch (403).
/// Der Anspruch wird unabhaengig von der Signatur-Pruefung verlangt – ein
/// korrekt signierter Benutzer-Token reicht nie fuer Admin-Routen.
#[derive(Debug, Clone)]
pub struct AdminClaims(pub Claims);

#[async_trait]
impl FromRequestParts<GatehouseState> for AdminClaims {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &GatehouseState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| fehler_antwort(StatusCode::UNAUTHORIZED, "No token provided."))?;

        let claims = state.token_dienst.pruefen(token).map_err(|_| {
            fehler_antwort(StatusCode::UNAUTHORIZED, "Invalid or expired token.")
        })?;

        if !claims.is_admin {
            return Err(fehler_antwort(StatusCode::FORBIDDEN, "Admin access required."));
        }

        Ok(AdminClaims(claims))
    }
}
