//! gRPC-Service-Implementierung fuer `sso.v1.Auth`
//!
//! Die Schicht prueft nur Pflichtfelder und uebersetzt Fehler. Alle
//! fachlichen Entscheidungen trifft der [`AuthService`].

use std::sync::Arc;

use sso_auth::{AuthError, AuthService};
use sso_core::{AppId, UserId};
use sso_db::{AppRepository, UserRepository};
use tonic::{metadata::MetadataMap, Request, Response, Status};
use tracing::Instrument;
use uuid::Uuid;

// Generierter Code aus tonic-build
pub mod proto {
    tonic::include_proto!("sso.v1");
}

use proto::*;

/// Metadaten-Schluessel fuer eine vom Client mitgegebene Korrelations-ID
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wert eines nicht gesetzten Zahlenfeldes in proto3
const LEERER_WERT: i64 = 0;

// ---------------------------------------------------------------------------
// Hilfsfunktionen
// ---------------------------------------------------------------------------

/// Baut den Span fuer einen Aufruf; die Request-ID kommt aus den Metadaten
/// oder wird neu erzeugt
fn anfrage_span(op: &'static str, metadata: &MetadataMap) -> tracing::Span {
    let request_id = metadata
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    tracing::info_span!("grpc", op, request_id = %request_id)
}

fn register_pruefen(req: &RegisterRequest) -> Result<(), Status> {
    if req.email.is_empty() {
        return Err(Status::invalid_argument("E-Mail fehlt"));
    }
    if req.password.is_empty() {
        return Err(Status::invalid_argument("Passwort fehlt"));
    }
    Ok(())
}

fn login_pruefen(req: &LoginRequest) -> Result<(), Status> {
    if req.email.is_empty() {
        return Err(Status::invalid_argument("E-Mail fehlt"));
    }
    if req.password.is_empty() {
        return Err(Status::invalid_argument("Passwort fehlt"));
    }
    if i64::from(req.app_id) == LEERER_WERT {
        return Err(Status::invalid_argument("app_id fehlt"));
    }
    Ok(())
}

fn is_admin_pruefen(req: &IsAdminRequest) -> Result<(), Status> {
    if req.user_id == LEERER_WERT {
        return Err(Status::invalid_argument("user_id fehlt"));
    }
    Ok(())
}

/// Uebersetzt Service-Fehler in gRPC-Status
///
/// Die vier fachlichen Fehler bleiben unterscheidbar. Interne Fehler werden
/// geloggt und nur generisch gemeldet.
pub(crate) fn auth_error_zu_status(e: AuthError) -> Status {
    match e {
        AuthError::BenutzerExistiert(_) => Status::already_exists("Benutzer existiert bereits"),
        AuthError::BenutzerNichtGefunden => Status::not_found("Benutzer nicht gefunden"),
        AuthError::UngueltigeAnmeldedaten => Status::unauthenticated("Ungueltige Anmeldedaten"),
        AuthError::AppNichtGefunden(_) => Status::not_found("App nicht gefunden"),
        AuthError::UngueltigeEingabe(msg) => Status::invalid_argument(msg),
        other => {
            tracing::error!(fehler = %other, "Interner Fehler bei gRPC-Aufruf");
            Status::internal("Interner Fehler")
        }
    }
}

// ---------------------------------------------------------------------------
// AuthService
// ---------------------------------------------------------------------------

pub struct AuthGrpcService<U: UserRepository + ?Sized, A: AppRepository + ?Sized> {
    auth: Arc<AuthService<U, A>>,
}

impl<U: UserRepository + ?Sized, A: AppRepository + ?Sized> AuthGrpcService<U, A> {
    pub fn neu(auth: Arc<AuthService<U, A>>) -> Self {
        Self { auth }
    }
}

#[tonic::async_trait]
impl<U, A> proto::auth_server::Auth for AuthGrpcService<U, A>
where
    U: UserRepository + ?Sized + 'static,
    A: AppRepository + ?Sized + 'static,
{
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let span = anfrage_span("Register", request.metadata());
        let body = request.into_inner();

        async move {
            register_pruefen(&body)?;
            let user_id = self
                .auth
                .registrieren(&body.email, &body.password)
                .await
                .map_err(auth_error_zu_status)?;

            Ok::<_, Status>(Response::new(RegisterResponse {
                user_id: user_id.inner(),
            }))
        }
        .instrument(span)
        .await
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let span = anfrage_span("Login", request.metadata());
        let body = request.into_inner();

        async move {
            login_pruefen(&body)?;
            let token = self
                .auth
                .anmelden(&body.email, &body.password, AppId(i64::from(body.app_id)))
                .await
                .map_err(auth_error_zu_status)?;

            Ok::<_, Status>(Response::new(LoginResponse { token }))
        }
        .instrument(span)
        .await
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let span = anfrage_span("IsAdmin", request.metadata());
        let body = request.into_inner();

        async move {
            is_admin_pruefen(&body)?;
            let is_admin = self
                .auth
                .ist_admin(UserId(body.user_id))
                .await
                .map_err(auth_error_zu_status)?;

            Ok::<_, Status>(Response::new(IsAdminResponse { is_admin }))
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn fachliche_fehler_verlustfrei() {
        assert_eq!(
            auth_error_zu_status(AuthError::BenutzerExistiert("a@b.de".into())).code(),
            Code::AlreadyExists
        );
        assert_eq!(
            auth_error_zu_status(AuthError::BenutzerNichtGefunden).code(),
            Code::NotFound
        );
        assert_eq!(
            auth_error_zu_status(AuthError::UngueltigeAnmeldedaten).code(),
            Code::Unauthenticated
        );
        assert_eq!(
            auth_error_zu_status(AuthError::AppNichtGefunden("app:9".into())).code(),
            Code::NotFound
        );
        assert_eq!(
            auth_error_zu_status(AuthError::UngueltigeEingabe("x".into())).code(),
            Code::InvalidArgument
        );
    }

    #[test]
    fn interne_fehler_verraten_keine_ursache() {
        let status = auth_error_zu_status(AuthError::intern("db passwort=hunter2"));
        assert_eq!(status.code(), Code::Internal);
        assert!(!status.message().contains("hunter2"));
    }

    #[test]
    fn pflichtfelder() {
        let leer = RegisterRequest {
            email: String::new(),
            password: "pw".into(),
        };
        assert_eq!(register_pruefen(&leer).unwrap_err().code(), Code::InvalidArgument);

        let ohne_app = LoginRequest {
            email: "a@b.de".into(),
            password: "pw".into(),
            app_id: 0,
        };
        assert_eq!(login_pruefen(&ohne_app).unwrap_err().code(), Code::InvalidArgument);

        assert!(is_admin_pruefen(&IsAdminRequest { user_id: 0 }).is_err());
        assert!(is_admin_pruefen(&IsAdminRequest { user_id: 3 }).is_ok());
    }
}
