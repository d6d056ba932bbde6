// Point endpoints
//
// CRUD over `/points`. Updates and creations echo the stored point back,
// which callers commit in place of their local copy.

use tracing::debug;

use crate::client::PointsClient;
use crate::error::Error;
use crate::models::{ApiNewPoint, ApiPoint};

impl PointsClient {
    /// List every stored point.
    ///
    /// `GET /points`
    pub async fn list_points(&self) -> Result<Vec<ApiPoint>, Error> {
        let url = self.url("points")?;
        debug!("listing points");
        self.get(url).await
    }

    /// Replace a stored point.
    ///
    /// `PUT /points/{id}`
    pub async fn update_point(&self, point: &ApiPoint) -> Result<ApiPoint, Error> {
        let url = self.point_url(&point.id)?;
        debug!(id = %point.id, "updating point");
        self.put(url, point).await
    }

    /// Create a point; the service assigns its id.
    ///
    /// `POST /points`
    pub async fn add_point(&self, point: &ApiNewPoint) -> Result<ApiPoint, Error> {
        let url = self.url("points")?;
        debug!(point_type = %point.point_type, "adding point");
        self.post(url, point).await
    }

    /// Delete a point.
    ///
    /// `DELETE /points/{id}`
    pub async fn delete_point(&self, id: &str) -> Result<(), Error> {
        let url = self.point_url(id)?;
        debug!(id, "deleting point");
        self.delete(url).await
    }
}
