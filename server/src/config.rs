//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist – mit einer Ausnahme: das JWT-Geheimnis hat bewusst
//! keinen Standardwert und sein Fehlen bricht den Start ab.

use serde::{Deserialize, Serialize};

/// Umgebungsvariable fuer das Token-Signatur-Geheimnis
pub const JWT_GEHEIMNIS_ENV: &str = "GATEHOUSE_JWT_SECRET";

/// Umgebungsvariable fuer das Admin-Bootstrap-Passwort
pub const ADMIN_PASSWORT_ENV: &str = "GATEHOUSE_ADMIN_PASSWORT";

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ServerConfig {
    /// Allgemeine Server-Einstellungen
    pub server: ServerEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Auth-Einstellungen (Token-Geheimnis)
    pub auth: AuthEinstellungen,
    /// Admin-Bootstrap-Einstellungen
    pub admin: AdminEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Bind-Adresse fuer die REST-API
    pub bind_adresse: String,
    /// Port fuer die REST-API
    pub port: u16,
    /// Erlaubte CORS-Origins. Leer = alle Origins erlaubt (nur fuer Entwicklung).
    pub cors_origins: Vec<String>,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 3001,
            cors_origins: vec![],
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://gatehouse.db".into(),
            max_verbindungen: 5,
            wal: true,
        }
    }
}

/// Auth-Einstellungen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// Token-Signatur-Geheimnis. Alternativ ueber die Umgebungsvariable
    /// GATEHOUSE_JWT_SECRET; ohne Wert startet der Server nicht.
    pub jwt_geheimnis: Option<String>,
}

/// Admin-Bootstrap-Einstellungen
///
/// Ist ein Passwort gesetzt (Konfiguration oder GATEHOUSE_ADMIN_PASSWORT)
/// und der Admin noch nicht angelegt, wird er beim Start erstellt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminEinstellungen {
    pub username: String,
    pub email: String,
    pub passwort: Option<String>,
}

impl Default for AdminEinstellungen {
    fn default() -> Self {
        Self {
            username: "admin".into(),
            email: "admin@example.com".into(),
            passwort: None,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Gibt die vollstaendige Bind-Adresse der REST-API zurueck
    pub fn bind_adresse(&self) -> String {
        format!("{}:{}", self.server.bind_adresse, self.server.port)
    }

    /// Loest das JWT-Geheimnis auf (Konfiguration, dann Umgebung)
    ///
    /// Ein fehlendes Geheimnis ist ein Startfehler, kein Request-Fehler.
    pub fn jwt_geheimnis(&self) -> anyhow::Result<String> {
        if let Some(geheimnis) = &self.auth.jwt_geheimnis {
            if !geheimnis.is_empty() {
                return Ok(geheimnis.clone());
            }
        }
        match std::env::var(JWT_GEHEIMNIS_ENV) {
            Ok(geheimnis) if !geheimnis.is_empty() => Ok(geheimnis),
            _ => anyhow::bail!(
                "JWT-Geheimnis fehlt: [auth].jwt_geheimnis setzen oder {JWT_GEHEIMNIS_ENV} exportieren"
            ),
        }
    }

    /// Gibt das Admin-Bootstrap-Passwort zurueck, falls konfiguriert
    pub fn admin_passwort(&self) -> Option<String> {
        self.admin
            .passwort
            .clone()
            .filter(|p| !p.is_empty())
            .or_else(|| std::env::var(ADMIN_PASSWORT_ENV).ok().filter(|p| !p.is_empty()))
    }

    /// Baut die Datenbank-Konfiguration fuer das DB-Crate
    pub fn datenbank_config(&self) -> gatehouse_db::DatabaseConfig {
        gatehouse_db::DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            sqlite_wal: self.datenbank.wal,
        }
    }
}
