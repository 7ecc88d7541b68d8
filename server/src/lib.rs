//! gatehouse-server – Bibliotheks-Root
//!
//! Deklariert die Server-Module und stellt den oeffentlichen
//! Einstiegspunkt fuer Integrationstests bereit.

pub mod config;
pub mod rest;

use std::sync::Arc;

use anyhow::{Context, Result};

use gatehouse_auth::{passwort_hashen, AuthService, TokenDienst};
use gatehouse_db::{models::NeuerAdmin, AdminRepository, SqliteDb};

use config::ServerConfig;
use rest::GatehouseState;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet den Server und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. JWT-Geheimnis aufloesen (fehlt es, bricht der Start ab)
    /// 2. Datenbankverbindung herstellen und migrieren
    /// 3. Admin-Bootstrap (falls konfiguriert)
    /// 4. REST-API binden und bedienen
    pub async fn starten(self) -> Result<()> {
        let geheimnis = self.config.jwt_geheimnis()?;

        let db = SqliteDb::oeffnen(&self.config.datenbank_config())
            .await
            .context("Datenbankverbindung fehlgeschlagen")?;

        admin_bootstrap(&db, &self.config).await?;

        let db = Arc::new(db);
        let token_dienst = TokenDienst::neu(&geheimnis);
        let auth = Arc::new(AuthService::neu(
            Arc::clone(&db),
            Arc::clone(&db),
            token_dienst.clone(),
        ));

        let state = GatehouseState::neu(auth, token_dienst);
        let app = rest::app(state, &self.config.server.cors_origins);

        let adresse = self.config.bind_adresse();
        let listener = tokio::net::TcpListener::bind(&adresse)
            .await
            .with_context(|| format!("Bind auf {adresse} fehlgeschlagen"))?;

        tracing::info!(adresse = %adresse, "Gatehouse-Server gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server beendet");
        Ok(())
    }
}

/// Legt den konfigurierten Admin an, falls er noch fehlt
///
/// Admins entstehen nur hier (Seed beim Start) – der Auth-Service selbst
/// legt nie Admins an. Wiederholte Aufrufe sind idempotent: existiert der
/// Admin bereits, passiert nichts.
pub async fn admin_bootstrap(db: &SqliteDb, config: &ServerConfig) -> Result<()> {
    let Some(passwort) = config.admin_passwort() else {
        return Ok(());
    };

    if AdminRepository::get_by_name(db, &config.admin.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %config.admin.username, "Admin bereits vorhanden");
        return Ok(());
    }

    let hash = tokio::task::spawn_blocking(move || passwort_hashen(&passwort))
        .await
        .context("Hashing-Task abgebrochen")??;

    let admin = AdminRepository::create(
        db,
        NeuerAdmin {
            username: &config.admin.username,
            email: &config.admin.email,
            password_hash: &hash,
        },
    )
    .await?;

    tracing::info!(admin_id = %admin.id, username = %admin.username, "Admin angelegt");
    Ok(())
}

/// Wartet auf Ctrl-C / SIGTERM
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown-Signal empfangen");
}

#[cfg(test)]
mod tests {
    use super::*;

    use gatehouse_auth::passwort_verifizieren;

    fn config_mit_admin_passwort(passwort: &str) -> ServerConfig {
        let mut config = ServerConfig::default();
        config.admin.passwort = Some(passwort.into());
        config
    }

    #[tokio::test]
    async fn admin_bootstrap_ist_idempotent() {
        let db = SqliteDb::in_memory().await.unwrap();
        let config = config_mit_admin_passwort("boot_pw");

        admin_bootstrap(&db, &config).await.unwrap();
        let erster = AdminRepository::get_by_name(&db, "admin")
            .await
            .unwrap()
            .expect("Admin muss nach dem Bootstrap existieren");
        assert!(passwort_verifizieren("boot_pw", &erster.password_hash));

        // Zweiter Lauf: kein Fehler, kein neuer Datensatz
        admin_bootstrap(&db, &config).await.unwrap();
        let zweiter = AdminRepository::get_by_name(&db, "admin")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(zweiter.id, erster.id);
        assert_eq!(zweiter.password_hash, erster.password_hash);
    }

    #[tokio::test]
    async fn admin_bootstrap_ohne_passwort_legt_nichts_an() {
        let db = SqliteDb::in_memory().await.unwrap();
        let mut config = ServerConfig::default();
        config.admin.passwort = None;
        std::env::remove_var(config::ADMIN_PASSWORT_ENV);

        admin_bootstrap(&db, &config).await.unwrap();
        assert!(AdminRepository::get_by_name(&db, "admin")
            .await
            .unwrap()
            .is_none());
    }
}
