//! gRPC-Server fuer den SSO-Dienst

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sso_auth::AuthService;
use sso_db::{AppRepository, UserRepository};
use tonic::transport::Server;

use crate::error::GrpcResult;
use crate::service::{proto::auth_server::AuthServer, AuthGrpcService};

/// gRPC-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct GrpcServerKonfig {
    pub bind_addr: SocketAddr,
    /// Obergrenze pro Aufruf; danach wird der Request-Future verworfen,
    /// laufende Store-Abfragen inklusive
    pub timeout: Duration,
}

impl Default for GrpcServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 44044)),
            timeout: Duration::from_secs(10),
        }
    }
}

/// gRPC-Server fuer `sso.v1.Auth`
pub struct GrpcServer {
    konfig: GrpcServerKonfig,
}

impl GrpcServer {
    pub fn neu(konfig: GrpcServerKonfig) -> Self {
        Self { konfig }
    }

    /// Startet den gRPC-Server und laeuft bis `shutdown` abgeschlossen ist
    pub async fn starten<U, A, F>(self, auth: Arc<AuthService<U, A>>, shutdown: F) -> GrpcResult<()>
    where
        U: UserRepository + ?Sized + 'static,
        A: AppRepository + ?Sized + 'static,
        F: Future<Output = ()>,
    {
        tracing::info!(
            addr = %self.konfig.bind_addr,
            timeout_ms = self.konfig.timeout.as_millis() as u64,
            "gRPC-Server gestartet"
        );

        Server::builder()
            .timeout(self.konfig.timeout)
            .add_service(AuthServer::new(AuthGrpcService::neu(auth)))
            .serve_with_shutdown(self.konfig.bind_addr, shutdown)
            .await?;

        tracing::info!("gRPC-Server beendet");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardwerte() {
        let konfig = GrpcServerKonfig::default();
        assert_eq!(konfig.bind_addr.port(), 44044);
        assert_eq!(konfig.timeout, Duration::from_secs(10));
    }
}
