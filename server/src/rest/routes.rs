//! Route-Definitionen fuer die Gatehouse-REST-API

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::rest::{handlers, GatehouseState};

/// Erstellt den vollstaendigen Router
pub fn router() -> Router<GatehouseState> {
    Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Benutzer
        .route("/users/register", post(handlers::users::register))
        .route("/users/login", post(handlers::users::login))
        .route("/users/status", get(handlers::users::status))
        // Admin
        .route("/admin/login", post(handlers::admin::login))
        .route("/admin/pending-users", get(handlers::admin::pending_users))
        .route("/admin/user/:id/status", patch(handlers::admin::set_status))
}
