//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt den Auth-Service von der konkreten
//! Datenbank-Implementierung. Der Service erhaelt seine Repositories per
//! Konstruktor-Injektion; es gibt keinen globalen Verbindungs-Singleton.

use uuid::Uuid;

use gatehouse_core::KontoStatus;

use crate::error::DbResult;
use crate::models::{AdminRecord, BenutzerRecord, NeuerAdmin, NeuerBenutzer};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://gatehouse.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://gatehouse.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe
#[allow(async_fn_in_trait)]
pub trait UserRepository: Send + Sync {
    /// Einen neuen Benutzer anlegen
    ///
    /// Die UNIQUE-Constraints auf `username` und `email` sind der
    /// massgebliche Duplikat-Schutz; Verletzungen werden als
    /// `DbError::Eindeutigkeit` gemeldet.
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord>;

    /// Einen Benutzer anhand seiner ID laden
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<BenutzerRecord>>;

    /// Einen Benutzer anhand seines Namens laden
    async fn get_by_name(&self, username: &str) -> DbResult<Option<BenutzerRecord>>;

    /// Einen Benutzer anhand seiner E-Mail laden
    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>>;

    /// Prueft ob Benutzername ODER E-Mail bereits vergeben sind
    ///
    /// Dient als schneller Vorab-Check vor dem Passwort-Hashing; die
    /// Constraints in `create` bleiben die letzte Instanz.
    async fn exists_name_or_email(&self, username: &str, email: &str) -> DbResult<bool>;

    /// Alle Benutzer mit dem angegebenen Status laden
    async fn list_by_status(&self, status: KontoStatus) -> DbResult<Vec<BenutzerRecord>>;

    /// Setzt den Status eines Benutzers
    ///
    /// Meldet `DbError::UngueltigeDaten` wenn die Status-Referenzzeile
    /// fehlt und `DbError::NichtGefunden` wenn kein Benutzer zur ID passt.
    async fn set_status(&self, id: Uuid, status: KontoStatus) -> DbResult<()>;
}

/// Repository fuer Admin-Datenzugriffe
///
/// Aus Sicht des Auth-Service sind Admins read-only; `create` existiert
/// fuer das Seed-Tooling beim Serverstart und fuer Tests.
#[allow(async_fn_in_trait)]
pub trait AdminRepository: Send + Sync {
    /// Einen Admin anhand seines Namens laden
    async fn get_by_name(&self, username: &str) -> DbResult<Option<AdminRecord>>;

    /// Einen neuen Admin anlegen
    async fn create(&self, data: NeuerAdmin<'_>) -> DbResult<AdminRecord>;
}
