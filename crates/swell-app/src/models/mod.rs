//! Presentation-side state. Models are owned by the presentation thread and
//! updated by draining service channels.

pub mod favorites_model;
pub mod forecast_model;
pub mod media_model;

pub use favorites_model::FavoritesList;
pub use forecast_model::{ForecastBoard, SpotRow, UNAVAILABLE};
pub use media_model::{GalleryUpdate, MediaGallery};
