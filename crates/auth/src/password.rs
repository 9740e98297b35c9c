//! Passwort-Hashes fuer gespeicherte Benutzer
//!
//! Im Store liegt nur der PHC-String (Algorithmus, Kosten, Salt, Hash).
//! Der Klartext verlaesst diese Funktionen nie.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::error::AuthError;

/// Speicherbedarf pro Hash in KiB
const SPEICHER_KIB: u32 = 64 * 1024;
/// Durchlaeufe ueber den Speicher
const DURCHLAEUFE: u32 = 3;
/// Lanes; ein Login belegt genau einen Blocking-Thread
const PARALLELITAET: u32 = 1;

/// Argon2id mit festen Kosten fuer Register und Login
///
/// Ein Hash kostet 64 MiB und drei Durchlaeufe auf einem Thread, also grob
/// eine Viertelsekunde auf einem Server-Kern. Das bremst Offline-Angriffe auf
/// einen gestohlenen Store und haelt parallele Logins trotzdem bezahlbar, weil
/// jeder Aufruf nur einen Blocking-Thread belegt. Die Kosten stehen im
/// PHC-String; aendern sie sich, bleiben alte Hashes pruefbar.
fn argon2_instanz() -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(SPEICHER_KIB, DURCHLAEUFE, PARALLELITAET, None)
        .map_err(|e| AuthError::PasswortHashing(format!("Argon2-Parameter ungueltig: {e}")))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
}

/// Erzeugt den PHC-String fuer ein neues Passwort (frisches Salt pro Aufruf)
pub fn passwort_hashen(passwort: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    argon2_instanz()?
        .hash_password(passwort.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswortHashing(e.to_string()))
}

/// Prueft ein Passwort gegen einen gespeicherten PHC-String
///
/// `Ok(false)` heisst falsches Passwort; ein kaputter Hash ist ein Fehler.
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> Result<bool, AuthError> {
    let gespeichert = PasswordHash::new(hash)
        .map_err(|e| AuthError::PasswortHashing(format!("Ungueltiges Hash-Format: {e}")))?;

    match argon2_instanz()?.verify_password(passwort.as_bytes(), &gespeichert) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
    }
}
