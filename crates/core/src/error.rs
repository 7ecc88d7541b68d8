//! Fehlertypen fuer gatehouse-core

use thiserror::Error;

/// Fehler beim Parsen eines Wire-Labels
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseFehler {
    #[error("Unbekannter Konto-Status: {0}")]
    UnbekannterStatus(String),

    #[error("Unbekannte Aktion: {0}")]
    UnbekannteAktion(String),
}
