// ── Domain model ──
//
// Canonical types shared by the models, presenters and views. Wire
// shapes live in `tripboard-api`; `crate::convert` bridges the two.

pub mod destination;
pub mod filter;
pub mod ids;
pub mod offer;
pub mod point;
pub mod sort;
pub mod update;

pub use destination::{Destination, Picture, find_destination};
pub use filter::FilterType;
pub use ids::{DestinationId, OfferId, PointId};
pub use offer::{Offer, OffersList};
pub use point::{Point, PointType};
pub use sort::SortType;
pub use update::{ModelEvent, ModelPayload, UpdateType, UserAction, ViewAction};
