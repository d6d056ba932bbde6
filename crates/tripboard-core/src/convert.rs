// ── API-to-domain type conversions ──
//
// Bridges raw `tripboard_api` wire types into canonical `crate::model`
// types and back, and implements `PointsApi` for the REST client on top
// of them. Point types arrive as free-form strings; anything outside the
// known set is rejected for points and skipped for the offer catalog.

use std::str::FromStr;

use futures_util::future::BoxFuture;
use tracing::warn;

use tripboard_api::{
    ApiDestination, ApiNewPoint, ApiOffer, ApiOfferGroup, ApiPicture, ApiPoint, PointsClient,
};

use crate::api::PointsApi;
use crate::error::CoreError;
use crate::model::{
    Destination, DestinationId, Offer, OfferId, OffersList, Picture, Point, PointId, PointType,
};

// ── Helpers ────────────────────────────────────────────────────────

fn parse_point_type(raw: &str) -> Result<PointType, CoreError> {
    PointType::from_str(raw).map_err(|_| CoreError::UnknownPointType {
        value: raw.to_owned(),
    })
}

/// The service sends `""` rather than omitting an unset destination.
fn destination_id(raw: Option<String>) -> Option<DestinationId> {
    raw.filter(|s| !s.is_empty()).map(DestinationId::from)
}

// ── Points ─────────────────────────────────────────────────────────

impl TryFrom<ApiPoint> for Point {
    type Error = CoreError;

    fn try_from(raw: ApiPoint) -> Result<Self, Self::Error> {
        Ok(Self {
            point_type: parse_point_type(&raw.point_type)?,
            id: PointId::from(raw.id),
            destination: destination_id(raw.destination),
            date_from: raw.date_from,
            date_to: raw.date_to,
            base_price: raw.base_price,
            offers: raw.offers.into_iter().map(OfferId::from).collect(),
            is_favorite: raw.is_favorite,
        })
    }
}

impl From<&Point> for ApiPoint {
    fn from(point: &Point) -> Self {
        Self {
            id: point.id.as_str().to_owned(),
            point_type: point.point_type.to_string(),
            destination: point.destination.as_ref().map(|d| d.as_str().to_owned()),
            date_from: point.date_from,
            date_to: point.date_to,
            base_price: point.base_price,
            offers: point.offers.iter().map(|o| o.as_str().to_owned()).collect(),
            is_favorite: point.is_favorite,
        }
    }
}

impl From<&Point> for ApiNewPoint {
    fn from(point: &Point) -> Self {
        ApiPoint::from(point).into()
    }
}

// ── Catalog ────────────────────────────────────────────────────────

impl From<ApiOffer> for Offer {
    fn from(raw: ApiOffer) -> Self {
        Self {
            id: OfferId::from(raw.id),
            title: raw.title,
            price: raw.price,
        }
    }
}

impl From<ApiPicture> for Picture {
    fn from(raw: ApiPicture) -> Self {
        Self {
            src: raw.src,
            description: raw.description,
        }
    }
}

impl From<ApiDestination> for Destination {
    fn from(raw: ApiDestination) -> Self {
        Self {
            id: DestinationId::from(raw.id),
            name: raw.name,
            description: raw.description,
            pictures: raw.pictures.into_iter().map(Picture::from).collect(),
        }
    }
}

/// Build the per-type catalog, dropping groups for unknown types.
pub fn offers_from_groups(groups: Vec<ApiOfferGroup>) -> OffersList {
    groups
        .into_iter()
        .filter_map(|group| match parse_point_type(&group.point_type) {
            Ok(point_type) => Some((
                point_type,
                group.offers.into_iter().map(Offer::from).collect(),
            )),
            Err(e) => {
                warn!(error = %e, "skipping offer group");
                None
            }
        })
        .collect()
}

// ── REST accessor ──────────────────────────────────────────────────

impl PointsApi for PointsClient {
    fn points(&self) -> BoxFuture<'_, Result<Vec<Point>, CoreError>> {
        Box::pin(async move {
            self.list_points()
                .await?
                .into_iter()
                .map(Point::try_from)
                .collect()
        })
    }

    fn offers(&self) -> BoxFuture<'_, Result<OffersList, CoreError>> {
        Box::pin(async move { Ok(offers_from_groups(self.list_offers().await?)) })
    }

    fn destinations(&self) -> BoxFuture<'_, Result<Vec<Destination>, CoreError>> {
        Box::pin(async move {
            Ok(self
                .list_destinations()
                .await?
                .into_iter()
                .map(Destination::from)
                .collect())
        })
    }

    fn update_point<'a>(&'a self, point: &'a Point) -> BoxFuture<'a, Result<Point, CoreError>> {
        Box::pin(async move {
            let stored = PointsClient::update_point(self, &ApiPoint::from(point)).await?;
            Point::try_from(stored)
        })
    }

    fn add_point<'a>(&'a self, point: &'a Point) -> BoxFuture<'a, Result<Point, CoreError>> {
        Box::pin(async move {
            let stored = PointsClient::add_point(self, &ApiNewPoint::from(point)).await?;
            Point::try_from(stored)
        })
    }

    fn delete_point<'a>(&'a self, id: &'a PointId) -> BoxFuture<'a, Result<(), CoreError>> {
        Box::pin(async move {
            PointsClient::delete_point(self, id.as_str()).await?;
            Ok(())
        })
    }
}
