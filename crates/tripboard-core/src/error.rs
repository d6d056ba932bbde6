// ── Core error types ──
//
// User-facing errors from tripboard-core. Consumers never see HTTP
// status codes or JSON parse failures directly: the
// `From<tripboard_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the points service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authorization failed: {message}")]
    AuthorizationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Unknown point type: {value}")]
    UnknownPointType { value: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation rejected by service: {message}")]
    Rejected { message: String },

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

impl From<tripboard_api::Error> for CoreError {
    fn from(err: tripboard_api::Error) -> Self {
        match err {
            tripboard_api::Error::Authorization { message } => {
                CoreError::AuthorizationFailed { message }
            }
            tripboard_api::Error::Transport(ref e) => {
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
            tripboard_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            tripboard_api::Error::ClientSetup(message) => CoreError::Config { message },
            tripboard_api::Error::Service { status: 404, message } => {
                CoreError::NotFound { message }
            }
            tripboard_api::Error::Service { status, message } if (400..500).contains(&status) => {
                CoreError::Rejected { message }
            }
            tripboard_api::Error::Service { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            tripboard_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
