//! sso-auth – Auth-Service des SSO-Dienstes
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Token-Ausgabe (JWT/HS256, signiert mit dem Secret der Ziel-App)
//! - AuthService (Registrierung, Login, Admin-Pruefung)

pub mod error;
pub mod password;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use password::{passwort_hashen, passwort_verifizieren};
pub use service::AuthService;
pub use token::{token_ausstellen, token_pruefen, TokenClaims};
