//! Favorites toggling. The store is local and cheap, so this runs inline.

use swell_favorites::{BlobStore, FavoritesError, FavoritesStore};
use swell_forecast::Forecast;

/// Error type for favorites operations
#[derive(Debug, Clone)]
pub enum FavoritesServiceError {
    Storage(String),
    Serialization(String),
    /// Nothing to save: the spot has no forecast yet.
    NoForecast(String),
}

impl std::fmt::Display for FavoritesServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FavoritesServiceError::Storage(s) => write!(f, "Favorites storage error: {}", s),
            FavoritesServiceError::Serialization(s) => {
                write!(f, "Favorites serialization error: {}", s)
            }
            FavoritesServiceError::NoForecast(spot) => {
                write!(f, "No forecast available to save for {}", spot)
            }
        }
    }
}

impl std::error::Error for FavoritesServiceError {}

impl From<FavoritesError> for FavoritesServiceError {
    fn from(e: FavoritesError) -> Self {
        match e {
            FavoritesError::Storage(e) => FavoritesServiceError::Storage(e.to_string()),
            FavoritesError::Serialization(e) => {
                FavoritesServiceError::Serialization(e.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

/// Remove `spot_name` from favorites if present, otherwise save `forecast`.
pub fn toggle_favorite<S: BlobStore>(
    store: &FavoritesStore<S>,
    spot_name: &str,
    forecast: Option<&Forecast>,
) -> Result<FavoriteToggle, FavoritesServiceError> {
    if store.contains(spot_name) {
        store.remove(spot_name)?;
        return Ok(FavoriteToggle::Removed);
    }

    let forecast =
        forecast.ok_or_else(|| FavoritesServiceError::NoForecast(spot_name.to_string()))?;
    store.add(forecast)?;
    Ok(FavoriteToggle::Added)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use swell_favorites::MemoryBlobStore;

    #[test]
    fn test_toggle_adds_then_removes() {
        let store = FavoritesStore::new(MemoryBlobStore::new());
        let forecast = Forecast::new("Pipeline", 3.0, 300.0, 14.0);

        let first = toggle_favorite(&store, "Pipeline", Some(&forecast)).unwrap();
        assert_eq!(first, FavoriteToggle::Added);
        assert!(store.contains("Pipeline"));

        let second = toggle_favorite(&store, "Pipeline", Some(&forecast)).unwrap();
        assert_eq!(second, FavoriteToggle::Removed);
        assert!(!store.contains("Pipeline"));
    }

    #[test]
    fn test_toggle_without_forecast() {
        let store = FavoritesStore::new(MemoryBlobStore::new());
        let err = toggle_favorite(&store, "Pipeline", None).unwrap_err();
        assert!(matches!(err, FavoritesServiceError::NoForecast(s) if s == "Pipeline"));

        // Removing never needs a forecast.
        store
            .add(&Forecast::new("Pipeline", 3.0, 300.0, 14.0))
            .unwrap();
        assert_eq!(
            toggle_favorite(&store, "Pipeline", None).unwrap(),
            FavoriteToggle::Removed
        );
    }
}
