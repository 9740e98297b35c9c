//! sso-grpc – gRPC-Schnittstelle fuer den SSO-Dienst
//!
//! Stellt den [`sso_auth::AuthService`] als `sso.v1.Auth` bereit:
//! - Pruefung der Pflichtfelder
//! - verlustfreie Abbildung der fachlichen Fehler auf gRPC-Statuscodes
//! - ein Tracing-Span pro Aufruf mit `op` und `request_id`

pub mod error;
pub mod server;
pub mod service;

pub use error::{GrpcError, GrpcResult};
pub use server::{GrpcServer, GrpcServerKonfig};
pub use service::{proto, AuthGrpcService};
