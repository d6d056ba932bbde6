//! Models, presenters and view contracts for the tripboard trip planner.
//!
//! This crate owns everything between the points service and the screen:
//!
//! - **Domain model** ([`model`]): [`Point`], [`OffersList`],
//!   [`Destination`], and the [`FilterType`] / [`SortType`] /
//!   [`UpdateType`] / [`UserAction`] tags.
//!
//! - **Observable models** ([`store`]): [`PointsModel`] and
//!   [`FilterModel`] broadcast [`ModelEvent`]s to typed observers;
//!   [`OffersModel`] and [`DestinationsModel`] are fetch-through caches.
//!   Snapshots are lock-free (`arc-swap`), so spawned mutation tasks
//!   commit without blocking renders.
//!
//! - **Presenters** ([`presenter`]): [`TripPresenter`] renders the board,
//!   routes keys and turns view requests into mutations. Outcomes come
//!   back as [`Signal`]s the front end feeds to
//!   [`handle_signal`](TripPresenter::handle_signal).
//!
//! - **Seams**: [`PointsApi`] abstracts the data source (the REST client
//!   via [`convert`], or the in-memory [`DemoSource`]); [`ViewFactory`],
//!   [`Surface`] and [`KeySource`] abstract the screen.

pub mod api;
pub mod config;
pub mod convert;
pub mod demo;
pub mod error;
pub mod input;
pub mod model;
pub mod presenter;
pub mod store;
pub mod util;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

// ── Primary re-exports ──────────────────────────────────────────────
pub use api::PointsApi;
pub use config::ServiceConfig;
pub use demo::DemoSource;
pub use error::CoreError;
pub use input::{EditorSlot, Key, KeyListeners, KeySource};
pub use presenter::{Models, NewPointPresenter, PointPresenter, Signal, TripPresenter};
pub use store::{DestinationsModel, FilterModel, Observable, ObserverId, OffersModel, PointsModel};
pub use view::{
    FormIntent, FormState, ItemIntent, Mount, PointFormView, PointItemView, RenderPosition,
    ShakeDone, SortView, Surface, Ui, View, ViewFactory, ViewId,
};

pub use model::{
    Destination, DestinationId, FilterType, ModelEvent, ModelPayload, Offer, OfferId, OffersList,
    Picture, Point, PointId, PointType, SortType, UpdateType, UserAction, ViewAction,
};
