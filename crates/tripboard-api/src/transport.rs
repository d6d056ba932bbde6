// Shared transport configuration for building reqwest::Client instances.
//
// Keeps timeout and default-header setup in one place so every client
// built for the points service authenticates the same way.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Sent as `Authorization: Basic <token>` on every request.
    pub authorization: Option<SecretString>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            authorization: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        if let Some(ref token) = self.authorization {
            let mut value = HeaderValue::from_str(&format!("Basic {}", token.expose_secret()))
                .map_err(|e| Error::ClientSetup(format!("invalid authorization token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("tripboard/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::ClientSetup(format!("failed to build HTTP client: {e}")))
    }

    /// Attach an authorization token.
    pub fn with_authorization(mut self, token: SecretString) -> Self {
        self.authorization = Some(token);
        self
    }
}
