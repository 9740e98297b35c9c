//! sso-server – Bibliotheks-Root
//!
//! Verdrahtet Store, Auth-Service und gRPC-Server und stellt den
//! oeffentlichen Einstiegspunkt fuer Integrationstests bereit.

pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::{AppEinstellung, ServerConfig};
use sso_auth::AuthService;
use sso_core::AppId;
use sso_db::SqliteDb;
use sso_grpc::{GrpcServer, GrpcServerKonfig};

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet alle Server-Subsysteme und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Datenbankverbindung herstellen, Migrationen ausfuehren
    /// 2. Konfigurierte Apps provisionieren
    /// 3. gRPC-Server starten
    /// 4. Auf Ctrl-C warten, danach Pool schliessen
    pub async fn starten(self) -> Result<()> {
        let grpc_konfig = GrpcServerKonfig {
            bind_addr: self.config.grpc_bind_adresse()?,
            timeout: self.config.grpc_timeout(),
        };

        tracing::info!(
            grpc = %grpc_konfig.bind_addr,
            token_ttl_s = self.config.auth.token_ttl_sekunden,
            "Server startet"
        );

        let db = Arc::new(
            SqliteDb::oeffnen(&self.config.datenbank_config())
                .await
                .context("Datenbank konnte nicht geoeffnet werden")?,
        );

        apps_provisionieren(&db, &self.config.apps).await?;

        let auth = Arc::new(AuthService::neu(
            Arc::clone(&db),
            Arc::clone(&db),
            self.config.token_ttl(),
        ));

        GrpcServer::neu(grpc_konfig)
            .starten(auth, shutdown_signal())
            .await
            .context("gRPC-Server beendet mit Fehler")?;

        db.schliessen().await;
        tracing::info!("Server beendet");
        Ok(())
    }
}

/// Legt alle konfigurierten Apps an bzw. aktualisiert sie
pub async fn apps_provisionieren(db: &SqliteDb, apps: &[AppEinstellung]) -> Result<()> {
    for app in apps {
        db.app_provisionieren(AppId(app.id), &app.name, &app.secret)
            .await
            .with_context(|| format!("App '{}' konnte nicht provisioniert werden", app.name))?;
    }
    if !apps.is_empty() {
        tracing::info!(anzahl = apps.len(), "Apps provisioniert");
    }
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown-Signal empfangen, Server wird beendet"),
        Err(e) => tracing::error!(fehler = %e, "Shutdown-Signal konnte nicht abgewartet werden"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sso_db::AppRepository;

    #[tokio::test]
    async fn apps_aus_konfig_werden_angelegt() {
        let db = SqliteDb::in_memory().await.unwrap();
        let apps = vec![
            AppEinstellung {
                id: 1,
                name: "portal".into(),
                secret: "s1".into(),
            },
            AppEinstellung {
                id: 2,
                name: "wiki".into(),
                secret: "s2".into(),
            },
        ];

        apps_provisionieren(&db, &apps).await.unwrap();
        // Zweiter Lauf (Neustart) ist unkritisch
        apps_provisionieren(&db, &apps).await.unwrap();

        let wiki = db.get_by_id(AppId(2)).await.unwrap().unwrap();
        assert_eq!(wiki.name, "wiki");
        assert_eq!(wiki.secret, "s2");
    }
}
