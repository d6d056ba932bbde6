// Offer and destination endpoints
//
// Read-only reference data; clients fetch these once at startup and
// again whenever a new point is created.

use tracing::debug;

use crate::client::PointsClient;
use crate::error::Error;
use crate::models::{ApiDestination, ApiOfferGroup};

impl PointsClient {
    /// List offers grouped by point type.
    ///
    /// `GET /offers`
    pub async fn list_offers(&self) -> Result<Vec<ApiOfferGroup>, Error> {
        let url = self.url("offers")?;
        debug!("listing offers");
        self.get(url).await
    }

    /// List every destination.
    ///
    /// `GET /destinations`
    pub async fn list_destinations(&self) -> Result<Vec<ApiDestination>, Error> {
        let url = self.url("destinations")?;
        debug!("listing destinations");
        self.get(url).await
    }
}
