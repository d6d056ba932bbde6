// Points service HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, status mapping and JSON
// decoding. Endpoint methods live in `points.rs` and `catalog.rs` as
// inherent impls so this module stays focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the points service.
///
/// Every request carries the authorization header configured on the
/// transport. Methods return decoded payloads; non-2xx responses become
/// [`Error::Authorization`] or [`Error::Service`].
pub struct PointsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PointsClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the service root, e.g. `https://trip.example.com/big-trip`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{path}`, tolerating a trailing slash on the base.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Build `{base}/points/{id}`. The id is escaped as one path segment.
    pub(crate) fn point_url(&self, id: &str) -> Result<Url, Error> {
        let mut url = self.url("points")?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::parse_json(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        Self::parse_json(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);
        let resp = self.http.put(url).json(body).send().await?;
        Self::parse_json(resp).await
    }

    /// Send a DELETE request. The service answers with an empty body.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self.http.delete(url).send().await?;
        Self::check_status(resp).await.map(|_| ())
    }

    /// Map non-success statuses to typed errors, passing successful
    /// responses through untouched.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authorization {
                message: service_message(&body)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Service {
                status: status.as_u16(),
                message: service_message(&body)
                    .unwrap_or_else(|| preview(&body)),
            });
        }

        Ok(resp)
    }

    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            }
        })
    }
}

/// First 200 characters of a response body, for error messages.
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

/// The service reports failures as `{"error": <code>, "message": "..."}`.
fn service_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ServiceError {
        message: Option<String>,
    }

    serde_json::from_str::<ServiceError>(body)
        .ok()
        .and_then(|e| e.message)
}
