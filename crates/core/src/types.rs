//! Konto-Lebenszyklus-Typen fuer Gatehouse
//!
//! Der Status wird in der Datenbank als Referenzzeile gespeichert, im
//! restlichen System aber ausschliesslich als Enum behandelt.

use serde::{Deserialize, Serialize};

use crate::error::ParseFehler;

/// Status eines Benutzerkontos
///
/// Neue Konten starten in `Pending`. Nur ein Admin wechselt den Status;
/// wiederholte Freigaben/Ablehnungen sind erlaubt (kein Monotonie-Zwang).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KontoStatus {
    Pending,
    Approved,
    Rejected,
}

impl KontoStatus {
    /// Gibt das Wire-Label zurueck ("PENDING", "APPROVED", "REJECTED")
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Alle bekannten Status-Werte (fuer Seeds und Tests)
    pub fn alle() -> [KontoStatus; 3] {
        [Self::Pending, Self::Approved, Self::Rejected]
    }
}

impl std::fmt::Display for KontoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.als_str())
    }
}

impl std::str::FromStr for KontoStatus {
    type Err = ParseFehler;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(ParseFehler::UnbekannterStatus(other.to_string())),
        }
    }
}

/// Admin-Aktion auf ein wartendes Konto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusAktion {
    Approve,
    Reject,
}

impl StatusAktion {
    /// Gibt das Wire-Label zurueck ("APPROVE", "REJECT")
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Approve => "APPROVE",
            Self::Reject => "REJECT",
        }
    }

    /// Der Status den diese Aktion setzt
    pub fn zielstatus(&self) -> KontoStatus {
        match self {
            Self::Approve => KontoStatus::Approved,
            Self::Reject => KontoStatus::Rejected,
        }
    }
}

impl std::str::FromStr for StatusAktion {
    type Err = ParseFehler;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVE" => Ok(Self::Approve),
            "REJECT" => Ok(Self::Reject),
            other => Err(ParseFehler::UnbekannteAktion(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_labels_rundreise() {
        for status in KontoStatus::alle() {
            let geparst = KontoStatus::from_str(status.als_str()).unwrap();
            assert_eq!(status, geparst);
        }
    }

    #[test]
    fn unbekannter_status_wird_abgelehnt() {
        let fehler = KontoStatus::from_str("MAYBE").unwrap_err();
        assert_eq!(fehler.to_string(), "Unbekannter Konto-Status: MAYBE");
        assert!(KontoStatus::from_str("pending").is_err(), "Labels sind case-sensitiv");
    }

    #[test]
    fn aktion_zielstatus() {
        assert_eq!(StatusAktion::Approve.zielstatus(), KontoStatus::Approved);
        assert_eq!(StatusAktion::Reject.zielstatus(), KontoStatus::Rejected);
    }

    #[test]
    fn aktion_parsen() {
        assert_eq!(StatusAktion::from_str("APPROVE").unwrap(), StatusAktion::Approve);
        assert_eq!(StatusAktion::from_str("REJECT").unwrap(), StatusAktion::Reject);
        assert!(StatusAktion::from_str("MAYBE").is_err());
    }

    #[test]
    fn status_serde_labels() {
        let json = serde_json::to_string(&KontoStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
        let zurueck: KontoStatus = serde_json::from_str("\"REJECTED\"").unwrap();
        assert_eq!(zurueck, KontoStatus::Rejected);
    }
}
