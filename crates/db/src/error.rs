//! Fehlertypen fuer das Datenbank-Crate

use thiserror::Error;

/// Datenbank-Fehlertypen
///
/// "Kein passender Datensatz" wird bei Lookups nicht als Fehler, sondern
/// als `Ok(None)` gemeldet. `NichtGefunden` ist fuer Schreibzugriffe auf
/// nicht vorhandene Zeilen reserviert.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Datensatz nicht gefunden: {0}")]
    NichtGefunden(String),

    #[error("Eindeutigkeitsverletzung: {0}")]
    Eindeutigkeit(String),

    #[error("Ungueltige Daten: {0}")]
    UngueltigeDaten(String),

    #[error("SQLx-Fehler: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration-Fehler: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Interner DB-Fehler: {0}")]
    Intern(String),
}

impl DbError {
    pub fn nicht_gefunden(msg: impl Into<String>) -> Self {
        Self::NichtGefunden(msg.into())
    }

    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// Gibt true zurueck wenn es sich um einen Eindeutigkeitsfehler handelt
    pub fn ist_eindeutigkeit(&self) -> bool {
        match self {
            Self::Eindeutigkeit(_) => true,
            Self::Sqlx(e) => ist_unique_verletzung(e),
            _ => false,
        }
    }
}

/// Prueft den typisierten Unique-Constraint-Code des Treibers
pub(crate) fn ist_unique_verletzung(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

/// Result-Alias fuer alle Repository-Operationen
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eindeutigkeit_wird_erkannt() {
        assert!(DbError::Eindeutigkeit("email".into()).ist_eindeutigkeit());
        assert!(!DbError::intern("kaputt").ist_eindeutigkeit());
        assert!(!DbError::Sqlx(sqlx::Error::RowNotFound).ist_eindeutigkeit());
    }
}
