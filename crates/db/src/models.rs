//! Datenbankmodelle fuer den SSO-Dienst
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank und dienen als
//! reine Datenuebertragungsobjekte zwischen Store und Auth-Service.

use chrono::{DateTime, Utc};
use sso_core::{AppId, UserId};

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
#[derive(Debug, Clone)]
pub struct BenutzerRecord {
    pub id: UserId,
    pub email: String,
    /// PHC-String (Algorithmus, Parameter, Salt, Hash), niemals Klartext
    pub pass_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub email: &'a str,
    pub pass_hash: &'a str,
}

// ---------------------------------------------------------------------------
// Client-Anwendungen
// ---------------------------------------------------------------------------

/// Registrierte Client-Anwendung
///
/// `secret` ist das Signaturmaterial fuer alle Tokens dieser App.
#[derive(Clone)]
pub struct AppRecord {
    pub id: AppId,
    pub name: String,
    pub secret: String,
}

// Secret nicht in Logs auftauchen lassen
impl std::fmt::Debug for AppRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"***")
            .finish()
    }
}
