// ── Presenters ──
//
// `TripPresenter` coordinates the board; `PointPresenter` and
// `NewPointPresenter` each own one form. Child presenters never hold a
// reference back to the coordinator: they return requests instead.

pub mod new_point;
pub mod point;
pub mod trip;

pub use new_point::NewPointPresenter;
pub use point::{Mode, PointPresenter, PointRequest};
pub use trip::{Models, Signal, TripPresenter};
