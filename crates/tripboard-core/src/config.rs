// ── Runtime service configuration ──
//
// Describes *how* to reach the points service. Carries credential data
// and connection tuning but never touches disk: the TUI or the config
// crate builds a `ServiceConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use tripboard_api::{PointsClient, TransportConfig};

use crate::error::CoreError;

/// Configuration for talking to one points service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service root (e.g., `https://trip.example.com/big-trip`).
    pub endpoint: Url,
    /// Token sent as `Authorization: Basic <token>`.
    pub authorization: SecretString,
    /// Request timeout.
    pub timeout: Duration,
}

impl ServiceConfig {
    /// Build the HTTP client described by this config.
    pub fn build_client(&self) -> Result<PointsClient, CoreError> {
        let transport = TransportConfig {
            timeout: self.timeout,
            authorization: Some(self.authorization.clone()),
        };
        Ok(PointsClient::new(self.endpoint.clone(), &transport)?)
    }
}
