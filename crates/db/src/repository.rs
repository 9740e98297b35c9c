//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt den Auth-Service von der konkreten
//! Datenbank-Implementierung. Der Service kennt nur diese Traits; welche
//! Persistenz dahinter steckt, entscheidet die Verdrahtung im Server.
//!
//! Lookups melden "kein passender Datensatz" als `Ok(None)`. So kann der
//! Aufrufer den leeren Treffer typisiert vom echten Fehler unterscheiden.

use async_trait::async_trait;
use sso_core::{AppId, UserId};

use crate::error::DbResult;
use crate::models::{AppRecord, BenutzerRecord, NeuerBenutzer};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://sso.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://sso.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Legt einen neuen Benutzer an und gibt die vergebene ID zurueck
    ///
    /// Eine bereits vorhandene E-Mail liefert `DbError::Eindeutigkeit`,
    /// der bestehende Datensatz bleibt unveraendert.
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<UserId>;

    /// Laedt einen Benutzer anhand seiner E-Mail
    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>>;

    /// Liest das Admin-Flag; `None` wenn kein Benutzer mit dieser ID existiert
    async fn ist_admin(&self, id: UserId) -> DbResult<Option<bool>>;
}

/// Repository fuer registrierte Client-Anwendungen (nur lesend)
#[async_trait]
pub trait AppRepository: Send + Sync {
    /// Laedt eine App anhand ihrer ID
    async fn get_by_id(&self, id: AppId) -> DbResult<Option<AppRecord>>;
}
