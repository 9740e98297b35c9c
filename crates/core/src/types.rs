//! Gemeinsame Identifikationstypen fuer den SSO-Dienst
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! Benutzer- und App-IDs zur Compilezeit auszuschliessen. Die Werte selbst
//! vergibt der Store (Benutzer) bzw. die Provisionierung (Apps).

use serde::{Deserialize, Serialize};

/// Eindeutige Benutzer-ID, vom Store beim Anlegen vergeben
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Gibt den inneren Wert zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }

    /// 0 ist der leere Wert; alle anderen IDs entscheidet der Store
    pub fn ist_gesetzt(&self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Eindeutige ID einer Client-Anwendung (ausserhalb des Dienstes provisioniert)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub i64);

impl AppId {
    /// Gibt den inneren Wert zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }

    pub fn ist_gesetzt(&self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "app:{}", self.0)
    }
}
