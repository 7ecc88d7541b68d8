//! Signierte Bearer-Tokens (HS256)
//!
//! Tokens werden nicht serverseitig gespeichert; ihre Gueltigkeit beweist
//! allein Signatur und Ablaufzeit. Struktur: header.payload.signature,
//! signiert mit einem prozessweiten Geheimnis.
//!
//! Fehlerfaelle (kaputte Struktur, falsche Signatur, abgelaufen) werden
//! bewusst zu einem einzigen [`AuthError::TokenUngueltig`] zusammengefasst,
//! damit nach aussen keine Validierungs-Interna durchsickern.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Lebensdauer eines Benutzer-Tokens: 1 Stunde
pub const BENUTZER_TOKEN_SEKUNDEN: i64 = 60 * 60;

/// Lebensdauer eines Admin-Tokens: 2 Stunden
pub const ADMIN_TOKEN_SEKUNDEN: i64 = 2 * 60 * 60;

/// Ansprueche (Claims) eines Gatehouse-Tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subjekt: die Benutzer- bzw. Admin-ID
    pub sub: String,
    pub username: String,
    pub email: String,
    /// Admin-Anspruch. Fehlt das Feld im Payload, gilt es als `false` –
    /// ein Token ohne diesen Anspruch darf nie Admin-Routen erreichen.
    #[serde(default)]
    pub is_admin: bool,
    /// Ausgestellt am (Unix-Sekunden)
    pub iat: i64,
    /// Laeuft ab am (Unix-Sekunden)
    pub exp: i64,
}

/// Stellt Tokens aus und prueft sie
///
/// Haelt die aus dem prozessweiten Geheimnis abgeleiteten Schluessel.
#[derive(Clone)]
pub struct TokenDienst {
    kodierung: EncodingKey,
    dekodierung: DecodingKey,
}

impl TokenDienst {
    /// Erstellt einen neuen TokenDienst aus dem Signatur-Geheimnis
    pub fn neu(geheimnis: &str) -> Self {
        Self {
            kodierung: EncodingKey::from_secret(geheimnis.as_bytes()),
            dekodierung: DecodingKey::from_secret(geheimnis.as_bytes()),
        }
    }

    /// Stellt einen signierten Token mit der angegebenen Lebensdauer aus
    pub fn ausstellen(
        &self,
        id: Uuid,
        username: &str,
        email: &str,
        is_admin: bool,
        lebensdauer_sekunden: i64,
    ) -> AuthResult<String> {
        let jetzt = Utc::now().timestamp();
        let claims = Claims {
            sub: id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            is_admin,
            iat: jetzt,
            exp: jetzt + lebensdauer_sekunden,
        };

        encode(&Header::default(), &claims, &self.kodierung)
            .map_err(|e| AuthError::intern(format!("Token-Signierung fehlgeschlagen: {e}")))
    }

    /// Prueft einen Token und gibt die Claims zurueck
    ///
    /// Jeder Fehlschlag (Struktur, Signatur, Ablauf) ergibt denselben
    /// `TokenUngueltig`-Fehler.
    pub fn pruefen(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.dekodierung, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(grund = %e, "Token-Pruefung fehlgeschlagen");
                AuthError::TokenUngueltig
            })
    }
}
