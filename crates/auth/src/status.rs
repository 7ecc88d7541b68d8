//! Status-Policy: wer darf sich anmelden?
//!
//! Reine Funktionen ueber [`KontoStatus`]. Die Policy ist klein, aber sie
//! ist die einzige Stelle die entscheidet ob ein Konto login-faehig ist.

use gatehouse_core::KontoStatus;

/// Gibt `true` zurueck wenn der Status einen Login erlaubt
///
/// Nur `Approved` darf sich anmelden; `Pending` und `Rejected` sind gesperrt.
pub fn kann_anmelden(status: KontoStatus) -> bool {
    status == KontoStatus::Approved
}

/// Benutzer-sichtbare Meldung fuer ein blockiertes Konto
///
/// Wird nur fuer PENDING/REJECTED aufgerufen; der APPROVED-Pfad erreicht
/// diese Funktion nie.
pub fn blockiert_meldung(status: KontoStatus) -> String {
    format!("Account status: {status}.")
}
