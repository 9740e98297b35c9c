//! # sso-observability
//!
//! Structured Logging (Text oder JSON) via tracing-subscriber.
//! Request-IDs werden als Tracing-Span-Felder propagiert, nicht ueber
//! globalen Logger-Zustand.

pub mod logging;

pub use logging::{log_format_gueltig, log_level_gueltig, logging_initialisieren};
