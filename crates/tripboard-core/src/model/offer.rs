// ── Offers ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::OfferId;
use super::point::PointType;

/// An optional add-on for a point (luggage, meal, seat upgrade, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub price: u32,
}

/// Offer catalog keyed by point type. Read-only after fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffersList(BTreeMap<PointType, Vec<Offer>>);

impl OffersList {
    pub fn new(by_type: BTreeMap<PointType, Vec<Offer>>) -> Self {
        Self(by_type)
    }

    /// Offers available for `point_type` (empty when the type has none).
    pub fn for_type(&self, point_type: PointType) -> &[Offer] {
        self.0.get(&point_type).map_or(&[], Vec::as_slice)
    }

    /// Resolve selected offer ids against the catalog of `point_type`.
    pub fn selected<'a>(
        &'a self,
        point_type: PointType,
        ids: &'a [OfferId],
    ) -> impl Iterator<Item = &'a Offer> + 'a {
        self.for_type(point_type)
            .iter()
            .filter(move |offer| ids.contains(&offer.id))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PointType, Vec<Offer>)> for OffersList {
    fn from_iter<I: IntoIterator<Item = (PointType, Vec<Offer>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
