//! Token-Ausgabe fuer angemeldete Benutzer
//!
//! Ein Token ist ein JWT (HS256), signiert mit dem Secret der Ziel-App.
//! Tokens verschiedener Apps lassen sich daher nicht gegenseitig pruefen.
//! Tokens werden nirgends gespeichert; pruefen muessen sie die Apps selbst
//! mit ihrem eigenen Secret.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sso_db::{AppRecord, BenutzerRecord};

use crate::error::{AuthError, AuthResult};

/// Claims eines Session-Tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Benutzer-ID
    pub uid: i64,
    /// E-Mail des Benutzers
    pub email: String,
    /// Ziel-App
    pub app_id: i64,
    /// Ausstellungszeitpunkt (Unix-Sekunden)
    pub iat: i64,
    /// Ablaufzeitpunkt (Unix-Sekunden), immer `iat + TTL`
    pub exp: i64,
}

/// Stellt ein signiertes Token fuer `benutzer` und `app` aus
pub fn token_ausstellen(
    benutzer: &BenutzerRecord,
    app: &AppRecord,
    ttl: Duration,
) -> AuthResult<String> {
    token_ausstellen_zum(benutzer, app, ttl, Utc::now().timestamp())
}

/// Wie [`token_ausstellen`], aber mit festem Ausstellungszeitpunkt
pub(crate) fn token_ausstellen_zum(
    benutzer: &BenutzerRecord,
    app: &AppRecord,
    ttl: Duration,
    iat: i64,
) -> AuthResult<String> {
    if app.secret.is_empty() {
        return Err(AuthError::intern(format!("App {} hat kein Signatur-Secret", app.id)));
    }

    let ttl_sekunden = i64::try_from(ttl.as_secs())
        .map_err(|_| AuthError::intern(format!("Token-TTL zu gross: {ttl:?}")))?;
    let exp = iat
        .checked_add(ttl_sekunden)
        .ok_or_else(|| AuthError::intern("Token-Ablaufzeit ausserhalb des Wertebereichs"))?;

    let claims = TokenClaims {
        uid: benutzer.id.inner(),
        email: benutzer.email.clone(),
        app_id: app.id.inner(),
        iat,
        exp,
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(app.secret.as_bytes()),
    )
    .map_err(|e| AuthError::intern(format!("Token-Signatur fehlgeschlagen: {e}")))
}

/// Prueft Signatur und Ablauf eines Tokens und gibt die Claims zurueck
///
/// Fuer Apps, die ein Token mit ihrem eigenen Secret validieren.
pub fn token_pruefen(token: &str, secret: &str) -> AuthResult<TokenClaims> {
    if secret.is_empty() {
        return Err(AuthError::TokenUngueltig);
    }

    let mut validierung = Validation::new(Algorithm::HS256);
    validierung.leeway = 0;

    jsonwebtoken::decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validierung,
    )
    .map(|daten| daten.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenAbgelaufen,
        _ => AuthError::TokenUngueltig,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sso_core::{AppId, UserId};

    fn benutzer() -> BenutzerRecord {
        BenutzerRecord {
            id: UserId(42),
            email: "erika@example.org".into(),
            pass_hash: "$argon2id$dummy".into(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    fn app(id: i64, secret: &str) -> AppRecord {
        AppRecord {
            id: AppId(id),
            name: format!("app-{id}"),
            secret: secret.into(),
        }
    }

    const STUNDE: Duration = Duration::from_secs(3600);

    #[test]
    fn claims_round_trip() {
        let app = app(1, "secret-eins");
        let token = token_ausstellen(&benutzer(), &app, STUNDE).unwrap();
        assert!(!token.is_empty());

        let claims = token_pruefen(&token, "secret-eins").unwrap();
        assert_eq!(claims.uid, 42);
        assert_eq!(claims.email, "erika@example.org");
        assert_eq!(claims.app_id, 1);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn deterministisch_bei_gleichem_zeitpunkt() {
        let app = app(1, "secret");
        let iat = Utc::now().timestamp();
        let t1 = token_ausstellen_zum(&benutzer(), &app, STUNDE, iat).unwrap();
        let t2 = token_ausstellen_zum(&benutzer(), &app, STUNDE, iat).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn falsches_secret_wird_abgelehnt() {
        let token = token_ausstellen(&benutzer(), &app(1, "secret-eins"), STUNDE).unwrap();
        let ergebnis = token_pruefen(&token, "secret-zwei");
        assert!(matches!(ergebnis, Err(AuthError::TokenUngueltig)));
    }

    #[test]
    fn verschiedene_apps_verschiedene_tokens() {
        let iat = Utc::now().timestamp();
        let t1 = token_ausstellen_zum(&benutzer(), &app(1, "a"), STUNDE, iat).unwrap();
        let t2 = token_ausstellen_zum(&benutzer(), &app(2, "b"), STUNDE, iat).unwrap();
        assert_ne!(t1, t2);
        assert_ne!(t1.rsplit('.').next(), t2.rsplit('.').next(), "Signaturen muessen abweichen");
    }

    #[test]
    fn abgelaufenes_token() {
        let app = app(1, "secret");
        let iat = Utc::now().timestamp() - 7200;
        let token = token_ausstellen_zum(&benutzer(), &app, STUNDE, iat).unwrap();
        let ergebnis = token_pruefen(&token, "secret");
        assert!(matches!(ergebnis, Err(AuthError::TokenAbgelaufen)));
    }

    #[test]
    fn leeres_secret_ist_interner_fehler() {
        let ergebnis = token_ausstellen(&benutzer(), &app(1, ""), STUNDE);
        assert!(matches!(ergebnis, Err(AuthError::Intern(_))));
    }

    #[test]
    fn manipuliertes_token_wird_abgelehnt() {
        let token = token_ausstellen(&benutzer(), &app(1, "secret"), STUNDE).unwrap();
        let manipuliert = format!("{token}x");
        assert!(matches!(
            token_pruefen(&manipuliert, "secret"),
            Err(AuthError::TokenUngueltig)
        ));
        assert!(matches!(token_pruefen("kein.jwt", "secret"), Err(AuthError::TokenUngueltig)));
    }
}
