//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist. Apps muessen allerdings ueber `[[apps]]` oder direkt in
//! der Datenbank provisioniert werden, sonst schlaegt jeder Login fehl.

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sso_db::DatabaseConfig;

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Token-Einstellungen
    pub auth: AuthEinstellungen,
    /// gRPC-Einstellungen
    pub grpc: GrpcEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// Beim Start zu provisionierende Client-Anwendungen
    pub apps: Vec<AppEinstellung>,
}

/// Token-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// Lebensdauer ausgestellter Tokens in Sekunden
    pub token_ttl_sekunden: u64,
}

impl Default for AuthEinstellungen {
    fn default() -> Self {
        Self {
            token_ttl_sekunden: 3600,
        }
    }
}

/// gRPC-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcEinstellungen {
    /// Bind-Adresse
    pub bind_adresse: String,
    /// Port
    pub port: u16,
    /// Zeitlimit pro Aufruf in Sekunden
    pub timeout_sekunden: u64,
}

impl Default for GrpcEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 44044,
            timeout_sekunden: 10,
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub sqlite_wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://sso.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Eine Client-Anwendung, die beim Start angelegt bzw. aktualisiert wird
#[derive(Clone, Serialize, Deserialize)]
pub struct AppEinstellung {
    pub id: i64,
    pub name: String,
    pub secret: String,
}

impl std::fmt::Debug for AppEinstellung {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEinstellung")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"***")
            .finish()
    }
}

/// Herkunft einer geladenen Konfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KonfigQuelle {
    /// Aus der angegebenen Datei gelesen
    Datei,
    /// Datei fehlte, Standardwerte verwendet
    Standardwerte,
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    ///
    /// Fehlt die Datei, wird die Standardkonfiguration verwendet. Das Logging
    /// steht zu diesem Zeitpunkt noch nicht; der Aufrufer meldet den Fall
    /// anhand der [`KonfigQuelle`].
    pub fn laden(pfad: &str) -> anyhow::Result<(Self, KonfigQuelle)> {
        let (config, quelle) = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                (config, KonfigQuelle::Datei)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                (Self::default(), KonfigQuelle::Standardwerte)
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
                ))
            }
        };

        config.validieren()?;
        Ok((config, quelle))
    }

    /// Prueft die Werte, die Serde allein nicht abdecken kann
    pub fn validieren(&self) -> anyhow::Result<()> {
        if self.auth.token_ttl_sekunden == 0 {
            anyhow::bail!("auth.token_ttl_sekunden muss groesser als 0 sein");
        }
        if self.grpc.bind_adresse.parse::<IpAddr>().is_err() {
            anyhow::bail!(
                "grpc.bind_adresse '{}' ist keine IP-Adresse",
                self.grpc.bind_adresse
            );
        }
        if self.grpc.timeout_sekunden == 0 {
            anyhow::bail!("grpc.timeout_sekunden muss groesser als 0 sein");
        }
        if !sso_observability::log_level_gueltig(&self.logging.level) {
            anyhow::bail!("Unbekanntes Log-Level '{}'", self.logging.level);
        }
        if !sso_observability::log_format_gueltig(&self.logging.format) {
            anyhow::bail!("Unbekanntes Log-Format '{}'", self.logging.format);
        }

        let mut ids = HashSet::new();
        for app in &self.apps {
            if app.id <= 0 {
                anyhow::bail!("App '{}': id muss positiv sein", app.name);
            }
            if app.secret.is_empty() {
                anyhow::bail!("App '{}': secret darf nicht leer sein", app.name);
            }
            if !ids.insert(app.id) {
                anyhow::bail!("App-ID {} ist doppelt konfiguriert", app.id);
            }
        }
        Ok(())
    }

    /// Lebensdauer ausgestellter Tokens
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.auth.token_ttl_sekunden)
    }

    /// Zeitlimit pro gRPC-Aufruf
    pub fn grpc_timeout(&self) -> Duration {
        Duration::from_secs(self.grpc.timeout_sekunden)
    }

    /// Socket-Adresse fuer den gRPC-Server (IPv4 oder IPv6)
    pub fn grpc_bind_adresse(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self.grpc.bind_adresse.parse().map_err(|_| {
            anyhow::anyhow!(
                "grpc.bind_adresse '{}' ist keine IP-Adresse",
                self.grpc.bind_adresse
            )
        })?;
        Ok(SocketAddr::new(ip, self.grpc.port))
    }

    /// Datenbank-Konfiguration fuer `sso-db`
    pub fn datenbank_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            sqlite_wal: self.datenbank.sqlite_wal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert!(cfg.validieren().is_ok());
        assert_eq!(cfg.token_ttl(), Duration::from_secs(3600));
        assert_eq!(cfg.grpc.port, 44044);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.apps.is_empty());
    }

    #[test]
    fn bind_adresse() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.grpc_bind_adresse().unwrap().to_string(), "0.0.0.0:44044");
    }

    #[test]
    fn bind_adresse_ipv6() {
        let mut cfg = ServerConfig::default();
        cfg.grpc.bind_adresse = "::".into();
        assert!(cfg.validieren().is_ok());

        let addr = cfg.grpc_bind_adresse().unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.port(), 44044);
        assert_eq!(addr.to_string(), "[::]:44044");
    }

    #[test]
    fn bind_adresse_ohne_ip_abgelehnt() {
        let mut cfg = ServerConfig::default();
        cfg.grpc.bind_adresse = "kein-host".into();
        assert!(cfg.validieren().is_err());
        assert!(cfg.grpc_bind_adresse().is_err());
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [auth]
            token_ttl_sekunden = 900

            [grpc]
            port = 50051

            [[apps]]
            id = 1
            name = "portal"
            secret = "geheim"
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert!(cfg.validieren().is_ok());
        assert_eq!(cfg.token_ttl(), Duration::from_secs(900));
        assert_eq!(cfg.grpc.port, 50051);
        assert_eq!(cfg.apps.len(), 1);
        assert_eq!(cfg.apps[0].name, "portal");
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.grpc.timeout_sekunden, 10);
        assert_eq!(cfg.datenbank.url, "sqlite://sso.db");
    }

    #[test]
    fn ttl_null_ist_ungueltig() {
        let mut cfg = ServerConfig::default();
        cfg.auth.token_ttl_sekunden = 0;
        assert!(cfg.validieren().is_err());
    }

    #[test]
    fn doppelte_app_ids_abgelehnt() {
        let mut cfg = ServerConfig::default();
        let app = AppEinstellung {
            id: 1,
            name: "a".into(),
            secret: "s".into(),
        };
        cfg.apps = vec![app.clone(), AppEinstellung { name: "b".into(), ..app }];
        assert!(cfg.validieren().is_err());
    }

    #[test]
    fn app_ohne_secret_abgelehnt() {
        let mut cfg = ServerConfig::default();
        cfg.apps.push(AppEinstellung {
            id: 2,
            name: "leer".into(),
            secret: String::new(),
        });
        assert!(cfg.validieren().is_err());
    }

    #[test]
    fn fehlende_datei_ergibt_standardwerte() {
        let (cfg, quelle) = ServerConfig::laden("/nicht/vorhanden/sso.toml").unwrap();
        assert_eq!(quelle, KonfigQuelle::Standardwerte);
        assert_eq!(cfg.auth.token_ttl_sekunden, 3600);
    }

    #[test]
    fn vorhandene_datei_wird_gelesen() {
        let pfad = std::env::temp_dir().join(format!("sso-config-{}.toml", std::process::id()));
        std::fs::write(&pfad, "[grpc]\nport = 50052\n").unwrap();

        let ergebnis = ServerConfig::laden(pfad.to_str().unwrap());
        let _ = std::fs::remove_file(&pfad);

        let (cfg, quelle) = ergebnis.unwrap();
        assert_eq!(quelle, KonfigQuelle::Datei);
        assert_eq!(cfg.grpc.port, 50052);
    }

    #[test]
    fn debug_verbirgt_app_secret() {
        let app = AppEinstellung {
            id: 1,
            name: "portal".into(),
            secret: "streng-geheim".into(),
        };
        assert!(!format!("{app:?}").contains("streng-geheim"));
    }
}
