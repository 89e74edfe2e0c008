// ── Core error types ──
//
// User-facing errors from dojo-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<dojo_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

use crate::model::CourseId;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to learner portal at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Learner portal request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("No learner portal found for enterprise '{slug}'")]
    EnterpriseNotFound { slug: String },

    #[error("Course not found: {id}")]
    CourseNotFound { id: CourseId },

    #[error("Resource not found: {path}")]
    NotFound { path: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<dojo_api::Error> for CoreError {
    fn from(err: dojo_api::Error) -> Self {
        match err {
            dojo_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            dojo_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            dojo_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            dojo_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            dojo_api::Error::NotFound { path } => CoreError::NotFound { path },
            dojo_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            dojo_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
