pub mod app_services;
pub mod error_mapping;
pub mod models;
pub mod services;

pub use app_services::{AppServices, Favorites};
pub use models::{FavoritesList, ForecastBoard, GalleryUpdate, MediaGallery, SpotRow};
pub use services::{
    FavoriteToggle, FavoritesServiceError, ForecastServiceMessage, MediaServiceError,
    MediaServiceMessage, TaskSpawner,
};
