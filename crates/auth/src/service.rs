//! Auth-Service fuer Gatehouse
//!
//! Zentraler Orchestrator ueber Hasher, Status-Policy, Token-Dienst und den
//! injizierten Repositories. Der Service haelt selbst keinen persistenten
//! Zustand; die Benutzer- und Admin-Stores kommen per Konstruktor herein.

use std::str::FromStr;
use std::sync::Arc;

use uuid::Uuid;

use gatehouse_core::{KontoStatus, StatusAktion};
use gatehouse_db::{
    error::DbError,
    models::{BenutzerRecord, NeuerBenutzer},
    repository::{AdminRepository, UserRepository},
};

use crate::{
    error::{AuthError, AuthResult},
    password::{passwort_hashen, passwort_verifizieren},
    status,
    token::{TokenDienst, ADMIN_TOKEN_SEKUNDEN, BENUTZER_TOKEN_SEKUNDEN},
};

/// Ergebnis einer erfolgreichen Anmeldung
#[derive(Debug, Clone)]
pub struct Anmeldung {
    pub token: String,
    pub username: String,
    pub email: String,
}

/// Ergebnis einer Statusabfrage
#[derive(Debug, Clone)]
pub struct StatusAuskunft {
    pub username: String,
    pub email: String,
    pub status: KontoStatus,
}

/// Auth-Service – zentraler Einstiegspunkt fuer alle Authentifizierungsvorgaenge
pub struct AuthService<U: UserRepository, A: AdminRepository> {
    user_repo: Arc<U>,
    admin_repo: Arc<A>,
    token_dienst: TokenDienst,
}

impl<U: UserRepository, A: AdminRepository> AuthService<U, A> {
    /// Erstellt einen neuen AuthService
    pub fn neu(user_repo: Arc<U>, admin_repo: Arc<A>, token_dienst: TokenDienst) -> Self {
        Self {
            user_repo,
            admin_repo,
            token_dienst,
        }
    }

    /// Registriert einen neuen Benutzer im Status PENDING
    ///
    /// Der Existenz-Check laeuft vor dem Hashing (kein verschwendeter
    /// Arbeitsfaktor, einheitliche Duplikat-Meldung). Massgeblich bleibt
    /// trotzdem der UNIQUE-Constraint beim Insert: gewinnt eine
    /// konkurrierende Registrierung das Rennen, wird auch deren
    /// Constraint-Verletzung als Duplikat gemeldet.
    ///
    /// Eine Registrierung authentifiziert nie – es gibt keinen Token.
    pub async fn registrieren(
        &self,
        username: &str,
        email: &str,
        passwort: &str,
    ) -> AuthResult<BenutzerRecord> {
        if username.is_empty() || email.is_empty() || passwort.is_empty() {
            return Err(AuthError::validierung("All fields are required."));
        }

        if self.user_repo.exists_name_or_email(username, email).await? {
            return Err(AuthError::IdentitaetVergeben);
        }

        let passwort_hash = hashen_blocking(passwort).await?;

        let benutzer = self
            .user_repo
            .create(NeuerBenutzer {
                username,
                email,
                password_hash: &passwort_hash,
                status: KontoStatus::Pending,
            })
            .await
            .map_err(|e| {
                if e.ist_eindeutigkeit() {
                    // Duplikat hat das Rennen zwischen Check und Insert gewonnen
                    AuthError::IdentitaetVergeben
                } else {
                    e.into()
                }
            })?;

        tracing::info!(
            user_id = %benutzer.id,
            username = %benutzer.username,
            "Neuer Benutzer registriert (PENDING)"
        );

        Ok(benutzer)
    }

    /// Meldet einen Benutzer an und stellt einen 1-Stunden-Token aus
    ///
    /// Unbekannter Benutzername und falsches Passwort ergeben denselben
    /// Fehler. Erst nach erfolgreicher Passwortpruefung entscheidet die
    /// Status-Policy; ein nicht freigegebenes Konto meldet seinen Status.
    pub async fn benutzer_anmelden(&self, username: &str, passwort: &str) -> AuthResult<Anmeldung> {
        if username.is_empty() || passwort.is_empty() {
            return Err(AuthError::validierung("Username and password are required."));
        }

        let benutzer = self
            .user_repo
            .get_by_name(username)
            .await?
            .ok_or(AuthError::UngueltigeAnmeldedaten)?;

        if !verifizieren_blocking(passwort, &benutzer.password_hash).await? {
            tracing::warn!(username = %username, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        if !status::kann_anmelden(benutzer.status) {
            return Err(AuthError::KontoNichtFreigegeben(benutzer.status));
        }

        let token = self.token_dienst.ausstellen(
            benutzer.id,
            &benutzer.username,
            &benutzer.email,
            false,
            BENUTZER_TOKEN_SEKUNDEN,
        )?;

        tracing::info!(
            user_id = %benutzer.id,
            username = %benutzer.username,
            "Benutzer angemeldet"
        );

        Ok(Anmeldung {
            token,
            username: benutzer.username,
            email: benutzer.email,
        })
    }

    /// Meldet einen Admin an und stellt einen 2-Stunden-Token mit
    /// Admin-Anspruch aus
    ///
    /// Admins durchlaufen keinen Freigabe-Workflow, es gibt kein Status-Gate.
    pub async fn admin_anmelden(&self, username: &str, passwort: &str) -> AuthResult<Anmeldung> {
        if username.is_empty() || passwort.is_empty() {
            return Err(AuthError::validierung("Username and password are required."));
        }

        let admin = self
            .admin_repo
            .get_by_name(username)
            .await?
            .ok_or(AuthError::UngueltigeAnmeldedaten)?;

        if !verifizieren_blocking(passwort, &admin.password_hash).await? {
            tracing::warn!(username = %username, "Fehlgeschlagener Admin-Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let token = self.token_dienst.ausstellen(
            admin.id,
            &admin.username,
            &admin.email,
            true,
            ADMIN_TOKEN_SEKUNDEN,
        )?;

        tracing::info!(admin_id = %admin.id, username = %admin.username, "Admin angemeldet");

        Ok(Anmeldung {
            token,
            username: admin.username,
            email: admin.email,
        })
    }

    /// Fragt den Konto-Status per Benutzername ODER E-Mail ab
    pub async fn status_abfragen(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> AuthResult<StatusAuskunft> {
        let benutzer = match (username.filter(|s| !s.is_empty()), email.filter(|s| !s.is_empty())) {
            (Some(name), _) => self.user_repo.get_by_name(name).await?,
            (None, Some(mail)) => self.user_repo.get_by_email(mail).await?,
            (None, None) => {
                return Err(AuthError::validierung("Username or email is required."));
            }
        };

        let benutzer = benutzer.ok_or_else(|| {
            AuthError::BenutzerNichtGefunden(
                username.or(email).unwrap_or_default().to_string(),
            )
        })?;

        Ok(StatusAuskunft {
            username: benutzer.username,
            email: benutzer.email,
            status: benutzer.status,
        })
    }

    /// Gibt alle Benutzer im Status PENDING zurueck (Admin-Sicht)
    ///
    /// Die Autorisierung (gueltiger Admin-Token) erzwingt der Aufrufer vor
    /// dem Aufruf; eine Sortierung wird nicht garantiert.
    pub async fn ausstehende_benutzer(&self) -> AuthResult<Vec<BenutzerRecord>> {
        Ok(self.user_repo.list_by_status(KontoStatus::Pending).await?)
    }

    /// Wendet eine Admin-Aktion (APPROVE/REJECT) auf einen Benutzer an
    ///
    /// Wiederholte Transitionen sind erlaubt; APPROVED und REJECTED sind
    /// jederzeit gegenseitig erreichbar.
    pub async fn status_setzen(&self, user_id: Uuid, aktion: &str) -> AuthResult<StatusAktion> {
        let aktion = StatusAktion::from_str(aktion)
            .map_err(|_| AuthError::validierung("Invalid action."))?;

        match self.user_repo.set_status(user_id, aktion.zielstatus()).await {
            Ok(()) => {
                tracing::info!(
                    user_id = %user_id,
                    aktion = aktion.als_str(),
                    "Konto-Status gesetzt"
                );
                Ok(aktion)
            }
            Err(DbError::NichtGefunden(_)) => {
                Err(AuthError::BenutzerNichtGefunden(user_id.to_string()))
            }
            // Fehlende Status-Referenzzeile: defensiv, sollte mit
            // konsistenter Status-Tabelle nie auftreten
            Err(DbError::UngueltigeDaten(_)) => {
                Err(AuthError::validierung("Status not found."))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Gibt den Token-Dienst zurueck (fuer Middleware und Tests)
    pub fn token_dienst(&self) -> &TokenDienst {
        &self.token_dienst
    }
}

/// Hasht auf dem Blocking-Pool, damit der Argon2-Arbeitsfaktor den
/// kooperativen Scheduler nicht blockiert
async fn hashen_blocking(passwort: &str) -> AuthResult<String> {
    let passwort = passwort.to_string();
    tokio::task::spawn_blocking(move || passwort_hashen(&passwort))
        .await
        .map_err(|e| AuthError::intern(format!("Hashing-Task abgebrochen: {e}")))?
}

/// Verifiziert auf dem Blocking-Pool, siehe [`hashen_blocking`]
async fn verifizieren_blocking(passwort: &str, hash: &str) -> AuthResult<bool> {
    let passwort = passwort.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || passwort_verifizieren(&passwort, &hash))
        .await
        .map_err(|e| AuthError::intern(format!("Verifikations-Task abgebrochen: {e}")))
}
