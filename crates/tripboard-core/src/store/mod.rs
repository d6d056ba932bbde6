// ── Observable models ──
//
// State shared between the presenters and the spawned mutation tasks.
// Snapshots are swapped atomically, so readers never block writers.

pub mod destinations;
pub mod filter;
pub mod observable;
pub mod offers;
pub mod points;

pub use destinations::DestinationsModel;
pub use filter::FilterModel;
pub use observable::{Observable, ObserverId};
pub use offers::OffersModel;
pub use points::PointsModel;
