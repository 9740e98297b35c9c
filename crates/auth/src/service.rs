//! Auth-Service fuer den SSO-Dienst
//!
//! Zentraler Service fuer Registrierung, Login und Admin-Pruefung.
//! Nutzt die Repository-Traits aus `sso-db` und den Token-Aussteller.
//!
//! Der Service haelt keinen veraenderlichen Zustand, nur die Token-TTL und
//! die Referenzen auf seine Repositories. Er kann beliebig oft parallel
//! aufgerufen werden.

use std::sync::Arc;
use std::time::Duration;

use sso_core::{AppId, UserId};
use sso_db::{AppRepository, NeuerBenutzer, UserRepository};

use crate::{
    error::{AuthError, AuthResult},
    password::{passwort_hashen, passwort_verifizieren},
    token::token_ausstellen,
};

/// Auth-Service – zentraler Einstiegspunkt fuer alle Authentifizierungsvorgaenge
pub struct AuthService<U: UserRepository + ?Sized, A: AppRepository + ?Sized> {
    user_repo: Arc<U>,
    app_repo: Arc<A>,
    token_ttl: Duration,
}

impl<U: UserRepository + ?Sized, A: AppRepository + ?Sized> AuthService<U, A> {
    /// Erstellt einen neuen AuthService
    pub fn neu(user_repo: Arc<U>, app_repo: Arc<A>, token_ttl: Duration) -> Self {
        Self {
            user_repo,
            app_repo,
            token_ttl,
        }
    }

    /// Registriert einen neuen Benutzer und gibt dessen ID zurueck
    ///
    /// Es wird kein Token ausgestellt.
    #[tracing::instrument(skip_all, fields(op = "auth.registrieren", email = %email))]
    pub async fn registrieren(&self, email: &str, passwort: &str) -> AuthResult<UserId> {
        if email.is_empty() {
            return Err(AuthError::UngueltigeEingabe("E-Mail fehlt".into()));
        }
        if passwort.is_empty() {
            return Err(AuthError::UngueltigeEingabe("Passwort fehlt".into()));
        }

        tracing::info!("Registriere neuen Benutzer");

        let pass_hash = hash_im_hintergrund(passwort.to_owned()).await.map_err(|e| {
            tracing::error!(fehler = %e, "Passwort-Hashing fehlgeschlagen");
            e
        })?;

        let id = match self
            .user_repo
            .create(NeuerBenutzer {
                email,
                pass_hash: &pass_hash,
            })
            .await
        {
            Ok(id) => id,
            Err(e) if e.ist_eindeutigkeit() => {
                tracing::warn!("E-Mail bereits registriert");
                return Err(AuthError::BenutzerExistiert(email.to_string()));
            }
            Err(e) => {
                tracing::error!(fehler = %e, "Benutzer konnte nicht gespeichert werden");
                return Err(AuthError::Datenbank(e));
            }
        };

        tracing::info!(user_id = %id, "Neuer Benutzer registriert");
        Ok(id)
    }

    /// Meldet einen Benutzer fuer eine App an und gibt ein signiertes Token zurueck
    ///
    /// Die drei Pruefungen laufen strikt nacheinander, jede sperrt die naechste:
    /// Benutzer laden, Passwort pruefen, App laden.
    #[tracing::instrument(skip_all, fields(op = "auth.anmelden", email = %email, app_id = %app_id))]
    pub async fn anmelden(&self, email: &str, passwort: &str, app_id: AppId) -> AuthResult<String> {
        if email.is_empty() {
            return Err(AuthError::UngueltigeEingabe("E-Mail fehlt".into()));
        }
        if !app_id.ist_gesetzt() {
            return Err(AuthError::UngueltigeEingabe("App-ID fehlt".into()));
        }

        tracing::info!("Benutzer meldet sich an");

        // Benutzer laden
        let benutzer = self
            .user_repo
            .get_by_email(email)
            .await
            .map_err(|e| {
                tracing::error!(fehler = %e, "Benutzer konnte nicht geladen werden");
                AuthError::Datenbank(e)
            })?
            .ok_or_else(|| {
                tracing::info!("Benutzer nicht gefunden");
                AuthError::BenutzerNichtGefunden
            })?;

        // Passwort pruefen
        let korrekt = verifizieren_im_hintergrund(passwort.to_owned(), benutzer.pass_hash.clone())
            .await
            .map_err(|e| {
                tracing::error!(user_id = %benutzer.id, fehler = %e, "Passwort-Pruefung fehlgeschlagen");
                e
            })?;
        if !korrekt {
            tracing::warn!(user_id = %benutzer.id, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        // App laden
        let app = self
            .app_repo
            .get_by_id(app_id)
            .await
            .map_err(|e| {
                tracing::error!(fehler = %e, "App konnte nicht geladen werden");
                AuthError::Datenbank(e)
            })?
            .ok_or_else(|| {
                tracing::warn!("App nicht gefunden");
                AuthError::AppNichtGefunden(app_id.to_string())
            })?;

        let token = token_ausstellen(&benutzer, &app, self.token_ttl).map_err(|e| {
            tracing::error!(fehler = %e, "Token konnte nicht ausgestellt werden");
            e
        })?;

        tracing::info!(user_id = %benutzer.id, "Benutzer angemeldet");
        Ok(token)
    }

    /// Prueft ob ein Benutzer Admin-Rechte hat
    ///
    /// Ein unbekannter Benutzer ist hier kein Fehler, sondern schlicht kein
    /// Admin. Beim Login dagegen ist derselbe Fall ein harter Fehler.
    #[tracing::instrument(skip_all, fields(op = "auth.ist_admin", user_id = %user_id))]
    pub async fn ist_admin(&self, user_id: UserId) -> AuthResult<bool> {
        if !user_id.ist_gesetzt() {
            return Err(AuthError::UngueltigeEingabe("Benutzer-ID fehlt".into()));
        }

        tracing::info!("Pruefe Admin-Rechte");

        let flag = self.user_repo.ist_admin(user_id).await.map_err(|e| {
            tracing::error!(fehler = %e, "Admin-Flag konnte nicht gelesen werden");
            AuthError::Datenbank(e)
        })?;

        let ist_admin = match flag {
            Some(admin) => admin,
            None => {
                tracing::debug!("Kein Benutzer mit dieser ID, behandle als Nicht-Admin");
                false
            }
        };

        tracing::info!(ist_admin, "Admin-Rechte geprueft");
        Ok(ist_admin)
    }
}

/// Argon2 ist absichtlich teuer und blockiert; laeuft deshalb im Blocking-Pool
async fn hash_im_hintergrund(passwort: String) -> AuthResult<String> {
    tokio::task::spawn_blocking(move || passwort_hashen(&passwort))
        .await
        .map_err(|e| AuthError::intern(format!("Hashing-Task abgebrochen: {e}")))?
}

async fn verifizieren_im_hintergrund(passwort: String, hash: String) -> AuthResult<bool> {
    tokio::task::spawn_blocking(move || passwort_verifizieren(&passwort, &hash))
        .await
        .map_err(|e| AuthError::intern(format!("Verifikations-Task abgebrochen: {e}")))?
}
