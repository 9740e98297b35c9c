//! Fehlertypen fuer den gRPC-Server

use thiserror::Error;

/// Fehler beim Starten oder Betreiben des gRPC-Servers
#[derive(Debug, Error)]
pub enum GrpcError {
    #[error("Transportfehler: {0}")]
    Transport(#[from] tonic::transport::Error),
}

pub type GrpcResult<T> = Result<T, GrpcError>;
