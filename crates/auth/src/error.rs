//! Fehlertypen fuer den Auth-Service
//!
//! Die vier fachlichen Varianten muessen bis zum Transport unterscheidbar
//! bleiben. Alles andere ist ein interner Fehler, dessen Ursache geloggt,
//! aber nicht an den Aufrufer weitergegeben wird.

use thiserror::Error;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Fachliche Fehler ---
    #[error("Benutzer existiert bereits: {0}")]
    BenutzerExistiert(String),

    #[error("Benutzer nicht gefunden")]
    BenutzerNichtGefunden,

    #[error("Ungueltige Anmeldedaten")]
    UngueltigeAnmeldedaten,

    #[error("App nicht gefunden: {0}")]
    AppNichtGefunden(String),

    // --- Aufruferfehler ---
    #[error("Ungueltige Eingabe: {0}")]
    UngueltigeEingabe(String),

    // --- Token (nur beim Pruefen) ---
    #[error("Token ungueltig")]
    TokenUngueltig,

    #[error("Token abgelaufen")]
    TokenAbgelaufen,

    // --- Intern ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] sso_db::DbError),

    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// Gibt true zurueck wenn der Fehler keine fachliche Bedeutung hat
    /// und dem Aufrufer nur als generischer Fehler gemeldet werden darf
    pub fn ist_intern(&self) -> bool {
        matches!(
            self,
            Self::PasswortHashing(_) | Self::Datenbank(_) | Self::Intern(_)
        )
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
