//! SQLite-Pool fuer Benutzer und Apps

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use crate::error::DbError;
use crate::repository::DatabaseConfig;

/// Credential-Store auf SQLite
///
/// Der Pool ist die einzige geteilte, veraenderliche Ressource des Dienstes.
/// Jede Repository-Operation ist eine eigenstaendige Einheit ohne
/// uebergreifende Transaktion.
#[derive(Debug, Clone)]
pub struct SqliteDb {
    pub(crate) pool: SqlitePool,
}

impl SqliteDb {
    /// Oeffnet (oder erzeugt) die Datenbankdatei und bringt das Schema auf Stand
    pub async fn oeffnen(config: &DatabaseConfig) -> Result<Self, DbError> {
        let journal = if config.sqlite_wal {
            SqliteJournalMode::Wal
        } else {
            SqliteJournalMode::Delete
        };
        let opts = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(journal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_verbindungen)
            .connect_with(opts)
            .await?;

        info!(url = %config.url, wal = config.sqlite_wal, "Credential-Store geoeffnet");

        let db = Self { pool };
        db.migrationen_ausfuehren().await?;
        Ok(db)
    }

    /// Legt `users` und `apps` an, falls noch nicht vorhanden
    pub async fn migrationen_ausfuehren(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Schema aktuell");
        Ok(())
    }

    /// Wartet auf laufende Abfragen und schliesst den Pool
    pub async fn schliessen(&self) {
        self.pool.close().await;
        info!("Credential-Store geschlossen");
    }

    /// Frischer Store im Speicher, fuer Tests
    ///
    /// Eine einzige, dauerhaft gehaltene Verbindung: jede weitere waere eine
    /// eigene, leere Datenbank.
    pub async fn in_memory() -> Result<Self, DbError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect_with(opts)
            .await?;

        let db = Self { pool };
        db.migrationen_ausfuehren().await?;
        Ok(db)
    }
}
