// ── Points API accessor ──
//
// The seam between the models and whatever actually stores points: the
// REST client in production, an in-memory source for demos and tests.

use futures_util::future::BoxFuture;

use crate::error::CoreError;
use crate::model::{Destination, OffersList, Point, PointId};

/// Async access to points, offers and destinations.
///
/// Every method returns a boxed future so the trait stays object-safe and
/// models can hold an `Arc<dyn PointsApi>`.
pub trait PointsApi: Send + Sync {
    fn points(&self) -> BoxFuture<'_, Result<Vec<Point>, CoreError>>;

    fn offers(&self) -> BoxFuture<'_, Result<OffersList, CoreError>>;

    fn destinations(&self) -> BoxFuture<'_, Result<Vec<Destination>, CoreError>>;

    /// Persist an edited point; resolves to the point as stored.
    fn update_point<'a>(&'a self, point: &'a Point) -> BoxFuture<'a, Result<Point, CoreError>>;

    /// Create a point; resolves to the stored point with its assigned id.
    fn add_point<'a>(&'a self, point: &'a Point) -> BoxFuture<'a, Result<Point, CoreError>>;

    fn delete_point<'a>(&'a self, id: &'a PointId) -> BoxFuture<'a, Result<(), CoreError>>;
}
