//! Datenbankmodelle fuer Gatehouse
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank. Das
//! `status_id`-Detail der Speicherung bleibt im SQLite-Modul; nach aussen
//! traegt jeder Benutzer-Datensatz direkt seinen [`KontoStatus`].

use chrono::{DateTime, Utc};
use gatehouse_core::KontoStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenutzerRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub status: KontoStatus,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub status: KontoStatus,
}

// ---------------------------------------------------------------------------
// Admins
// ---------------------------------------------------------------------------

/// Admin-Datensatz aus der Datenbank
///
/// Admins durchlaufen keinen Freigabe-Workflow und werden vom Auth-Service
/// nur gelesen. Angelegt werden sie ausschliesslich durch Seed-Tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Admins (Seed-Tooling und Tests)
#[derive(Debug, Clone)]
pub struct NeuerAdmin<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}
