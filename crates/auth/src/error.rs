//! Fehlertypen fuer den Auth-Service
//!
//! Die Varianten bilden die Fehler-Taxonomie des Systems ab; die
//! Uebersetzung in HTTP-Statuscodes und Wire-Nachrichten passiert erst an
//! der Server-Grenze.

use thiserror::Error;

use gatehouse_core::KontoStatus;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingaben ---
    /// Fehlende oder unbrauchbare Eingabe; traegt die Wire-Nachricht
    #[error("Validierung fehlgeschlagen: {0}")]
    Validierung(String),

    /// Benutzername oder E-Mail bereits vergeben
    #[error("Benutzername oder E-Mail bereits vergeben")]
    IdentitaetVergeben,

    // --- Authentifizierung ---
    /// Unbekannter Benutzer ODER falsches Passwort. Bewusst eine einzige
    /// Variante, damit kein Username-Enumeration moeglich ist.
    #[error("Benutzername oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    /// Passwort korrekt, aber das Konto ist nicht freigegeben
    #[error("Konto nicht freigegeben: Status {0}")]
    KontoNichtFreigegeben(KontoStatus),

    // --- Tokens ---
    /// Token fehlerhaft, falsch signiert oder abgelaufen. Die Faelle werden
    /// bewusst nicht unterschieden.
    #[error("Token ungueltig oder abgelaufen")]
    TokenUngueltig,

    /// Gueltiger Token ohne Admin-Anspruch
    #[error("Zugriff verweigert: Admin-Anspruch fehlt")]
    ZugriffVerweigert,

    // --- Benutzerverwaltung ---
    #[error("Benutzer nicht gefunden: {0}")]
    BenutzerNichtGefunden(String),

    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] gatehouse_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn validierung(msg: impl Into<String>) -> Self {
        Self::Validierung(msg.into())
    }

    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
