use thiserror::Error;

/// Top-level error type for the `tripboard-api` crate.
///
/// Covers every failure mode of the points service: authorization,
/// transport, HTTP status, and payload decoding. `tripboard-core` maps
/// these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authorization ───────────────────────────────────────────────
    /// The service rejected the `Authorization` header.
    #[error("Authorization rejected: {message}")]
    Authorization { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Building the HTTP client failed (bad header value, TLS backend).
    #[error("Client setup failed: {0}")]
    ClientSetup(String),

    // ── Service ─────────────────────────────────────────────────────
    /// Non-success status returned by the service.
    #[error("Service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
