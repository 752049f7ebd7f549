//! Surf forecasts for SwellUpdate
//!
//! Fetches hourly marine data from the Open-Meteo API, picks the sample
//! for the current hour and derives a surf rating and compass direction.

pub mod catalog;
pub mod client;
pub mod direction;
pub mod rating;
pub mod response;
pub mod types;

pub use catalog::{CatalogError, SpotCatalog};
pub use client::ForecastClient;
pub use direction::{classify_direction, CompassDirection};
pub use rating::{rate, SurfRating};
pub use response::{parse_forecast, MarineResponse};
pub use types::*;
