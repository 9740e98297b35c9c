//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable (hat Vorrang vor der Konfigurationsdatei):
//! - `SSO_LOG_LEVEL`: Filter im EnvFilter-Format, z.B. `info` oder `sso_auth=debug`
//! - `RUST_LOG`: wie gewohnt, falls `SSO_LOG_LEVEL` fehlt
//! - `SSO_LOG_FORMAT`: Format (text/json), Standard: text

use tracing_subscriber::{fmt, EnvFilter};

const ENV_LEVEL: &str = "SSO_LOG_LEVEL";
const ENV_FORMAT: &str = "SSO_LOG_FORMAT";

/// Initialisiert das Logging-System.
///
/// Liest `SSO_LOG_LEVEL`, `RUST_LOG` und `SSO_LOG_FORMAT` aus der Umgebung
/// und faellt auf die uebergebenen Werte zurueck. Schlaegt fehl, wenn bereits
/// ein globaler Subscriber gesetzt ist.
pub fn logging_initialisieren(level: &str, format: &str) -> anyhow::Result<()> {
    let sso_level = std::env::var(ENV_LEVEL).ok();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter_waehlen(sso_level.as_deref(), rust_log.as_deref(), level);

    let format_env = std::env::var(ENV_FORMAT).unwrap_or_else(|_| format.to_string());

    match format_env.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_current_span(true)
            .try_init(),
        _ => fmt().with_env_filter(filter).with_target(true).try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Logging konnte nicht initialisiert werden: {e}"))
}

/// Erster gueltiger Filter in der Reihenfolge `SSO_LOG_LEVEL`, `RUST_LOG`,
/// Konfiguration; sonst `info`
fn filter_waehlen(sso_level: Option<&str>, rust_log: Option<&str>, level: &str) -> EnvFilter {
    [sso_level, rust_log, Some(level)]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .find_map(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Validiert ob ein Log-Level-String gueltig ist.
pub fn log_level_gueltig(level: &str) -> bool {
    matches!(level, "trace" | "debug" | "info" | "warn" | "error")
}

/// Validiert ob ein Log-Format-String gueltig ist.
pub fn log_format_gueltig(format: &str) -> bool {
    matches!(format, "text" | "json")
}
