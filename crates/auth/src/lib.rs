//! gatehouse-auth – Authentifizierung und Konto-Lebenszyklus
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Signierte, zustandslose Bearer-Tokens (HS256, mit Ablauf)
//! - Die Status-Policy (nur APPROVED darf sich anmelden)
//! - AuthService (Registrierung, Benutzer-/Admin-Login, Statusabfrage,
//!   Freigabe/Ablehnung durch Admins)

pub mod error;
pub mod password;
pub mod service;
pub mod status;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use password::{passwort_hashen, passwort_verifizieren};
pub use service::{Anmeldung, AuthService, StatusAuskunft};
pub use token::{Claims, TokenDienst, ADMIN_TOKEN_SEKUNDEN, BENUTZER_TOKEN_SEKUNDEN};
