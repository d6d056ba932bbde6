// tripboard-api: Async Rust client for the trip points service

pub mod catalog;
pub mod client;
pub mod error;
pub mod models;
pub mod points;
pub mod transport;

pub use client::PointsClient;
pub use error::Error;
pub use models::{ApiDestination, ApiNewPoint, ApiOffer, ApiOfferGroup, ApiPicture, ApiPoint};
pub use transport::TransportConfig;
