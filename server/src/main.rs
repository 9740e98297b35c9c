//! SSO Server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.

use anyhow::Result;
use clap::Parser;
use sso_server::{
    config::{KonfigQuelle, ServerConfig},
    Server,
};

/// Single-Sign-On-Server (gRPC)
#[derive(Parser, Debug)]
#[command(name = "sso-server", version)]
struct Args {
    /// Pfad zur Konfigurationsdatei
    #[arg(long, env = "SSO_CONFIG", default_value = "config.toml", value_name = "PFAD")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Konfiguration laden (Standardwerte falls Datei fehlt)
    let (config, quelle) = ServerConfig::laden(&args.config)?;

    sso_observability::logging_initialisieren(&config.logging.level, &config.logging.format)?;

    if quelle == KonfigQuelle::Standardwerte {
        tracing::warn!(
            pfad = %args.config,
            "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
        );
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %args.config,
        "SSO Server wird initialisiert"
    );

    Server::neu(config).starten().await
}
