//! Passwort-Hashing mit Argon2id
//!
//! Stellt sichere Passwort-Hashfunktionen mit Argon2id bereit.
//! Argon2id ist der empfohlene Algorithmus gemaess OWASP-Richtlinien.
//! Der Arbeitsfaktor ist bewusst hoch (Brute-Force-Bremse).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::error::AuthError;

/// Argon2id-Parameter fuer sicheres Passwort-Hashing
///
/// Werte gemaess OWASP-Empfehlungen (Stand 2024):
/// - Speicher: 64 MiB
/// - Iterationen: 3
/// - Parallelismus: 1
fn argon2_instanz() -> Argon2<'static> {
    let params = Params::new(
        64 * 1024, // m_cost: 64 MiB
        3,         // t_cost: 3 Iterationen
        1,         // p_cost: 1 Thread
        None,      // output_len: Standard (32 Bytes)
    )
    .expect("Argon2-Parameter ungueltig");

    Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params)
}

/// Hasht ein Passwort mit Argon2id und einem zufaelligen Salt
///
/// Gibt den PHC-String zurueck (inkl. Algorithmus, Parameter und Salt).
pub fn passwort_hashen(passwort: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = argon2_instanz();

    argon2
        .hash_password(passwort.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswortHashing(e.to_string()))
}

/// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
///
/// Die Pruefung ist konstantzeitig (Argon2-Verifikation). Ein fehlerhaft
/// formatierter Hash gilt als Nichttreffer statt als Fehler, damit der
/// Login-Pfad nie an kaputten Datensaetzen scheitert.
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::warn!("Gespeicherter Passwort-Hash hat kein gueltiges PHC-Format");
        return false;
    };

    argon2_instanz()
        .verify_password(passwort.as_bytes(), &parsed_hash)
        .is_ok()
}
