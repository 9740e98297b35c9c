//! sso-db – Credential-Store
//!
//! Dieses Crate stellt das Repository-Pattern fuer Benutzer und
//! Client-Anwendungen bereit, dazu die SQLite-Implementierung auf Basis
//! von sqlx inklusive eingebetteter Migrationen.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use models::{AppRecord, BenutzerRecord, NeuerBenutzer};
pub use repository::{AppRepository, DatabaseConfig, UserRepository};
pub use sqlite::SqliteDb;
