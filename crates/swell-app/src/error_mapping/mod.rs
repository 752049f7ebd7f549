//! Maps service and domain errors to swell_core::AppError for consistent
//! user-facing messages. One module per service keeps the mappings small.

mod catalog;
mod favorites;
mod forecast;
mod media;

pub use catalog::from_catalog_error;
pub use forecast::from_forecast_error;
