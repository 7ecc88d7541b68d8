//! REST-Interface fuer Gatehouse
//!
//! Uebersetzt an der Server-Grenze alle Domaenenfehler in Statuscodes und
//! einzeilige Wire-Nachrichten. Interne Details (Stacktraces, DB-Fehler)
//! landen ausschliesslich im Log.

pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::Response;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use gatehouse_auth::{AuthError, AuthService, TokenDienst};
use gatehouse_db::SqliteDb;

use crate::rest::middleware::fehler_antwort;

/// Der konkrete Auth-Service des Servers (SQLite fuer beide Stores)
pub type GatehouseAuth = AuthService<SqliteDb, SqliteDb>;

/// Axum-State fuer den Gatehouse-Server
#[derive(Clone)]
pub struct GatehouseState {
    pub auth: Arc<GatehouseAuth>,
    pub token_dienst: TokenDienst,
}

impl GatehouseState {
    pub fn neu(auth: Arc<GatehouseAuth>, token_dienst: TokenDienst) -> Self {
        Self { auth, token_dienst }
    }
}

/// Baut die vollstaendige Axum-App (Routen + Layer + State)
pub fn app(state: GatehouseState, cors_origins: &[String]) -> Router {
    // Ohne konfigurierte Origins bleibt CORS offen
    let cors = if cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::OPTIONS,
            ])
            .allow_headers(tower_http::cors::Any)
    };

    routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Uebersetzt einen Domaenenfehler in die HTTP-Antwort
///
/// Unbekannter Benutzer und falsches Passwort teilen sich bewusst dieselbe
/// 401-Antwort; ebenso kollabieren alle Token-Fehlschlaege auf eine
/// Meldung. Unerwartete Fehler werden geloggt und als generisches 500
/// gemeldet.
pub fn fehler_in_antwort(fehler: AuthError) -> Response {
    match fehler {
        AuthError::Validierung(nachricht) => {
            fehler_antwort(StatusCode::BAD_REQUEST, &nachricht)
        }
        AuthError::IdentitaetVergeben => fehler_antwort(
            StatusCode::CONFLICT,
            "Username or email already exists.",
        ),
        AuthError::UngueltigeAnmeldedaten => {
            fehler_antwort(StatusCode::UNAUTHORIZED, "Invalid credentials.")
        }
        AuthError::KontoNichtFreigegeben(status) => fehler_antwort(
            StatusCode::FORBIDDEN,
            &gatehouse_auth::status::blockiert_meldung(status),
        ),
        AuthError::TokenUngueltig => {
            fehler_antwort(StatusCode::UNAUTHORIZED, "Invalid or expired token.")
        }
        AuthError::ZugriffVerweigert => {
            fehler_antwort(StatusCode::FORBIDDEN, "Admin access required.")
        }
        AuthError::BenutzerNichtGefunden(_) => {
            fehler_antwort(StatusCode::NOT_FOUND, "User not found.")
        }
        fehler @ (AuthError::PasswortHashing(_)
        | AuthError::Datenbank(_)
        | AuthError::Intern(_)) => {
            tracing::error!(fehler = %fehler, "Unerwarteter Fehler im Auth-Service");
            fehler_antwort(StatusCode::INTERNAL_SERVER_ERROR, "Server error.")
        }
    }
}
