//! sso-core – Gemeinsame Typen
//!
//! Dieses Crate stellt die ID-Typen bereit, die von Store, Auth-Service
//! und Transport gemeinsam genutzt werden.

pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use types::{AppId, UserId};
