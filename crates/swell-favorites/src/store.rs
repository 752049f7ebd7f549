use thiserror::Error;

use swell_core::FavoritesConfig;
use swell_forecast::Forecast;

use crate::blob::BlobStore;

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Favorites storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Favorites serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Favorite spots, each a forecast snapshot, unique by spot name.
///
/// Every call is a read-modify-write of the whole list. There is no
/// cross-writer locking: the last write wins.
pub struct FavoritesStore<S> {
    store: S,
    key: String,
}

impl<S: BlobStore> FavoritesStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, &FavoritesConfig::default())
    }

    pub fn with_config(store: S, config: &FavoritesConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
        }
    }

    /// All favorites in stored order.
    ///
    /// Missing, unreadable or corrupt state reads as an empty list.
    pub fn list(&self) -> Vec<Forecast> {
        let bytes = match self.store.read(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::warn!("Discarding unreadable favorites: {}", e);
                Vec::new()
            }
        }
    }

    /// Append `forecast` unless a favorite with the same spot name exists.
    ///
    /// Returns whether it was added; an existing entry is left untouched.
    pub fn add(&self, forecast: &Forecast) -> Result<bool, FavoritesError> {
        let mut favorites = self.list();
        if favorites
            .iter()
            .any(|f| f.spot_name() == forecast.spot_name())
        {
            tracing::debug!("{} is already a favorite", forecast.spot_name());
            return Ok(false);
        }

        favorites.push(forecast.clone());
        self.save(&favorites)?;
        tracing::info!("Added favorite: {}", forecast.spot_name());
        Ok(true)
    }

    /// Remove every favorite named `spot_name`. Returns how many were removed.
    pub fn remove(&self, spot_name: &str) -> Result<usize, FavoritesError> {
        let mut favorites = self.list();
        let before = favorites.len();
        favorites.retain(|f| f.spot_name() != spot_name);
        let removed = before - favorites.len();

        if removed > 0 {
            self.save(&favorites)?;
            tracing::info!("Removed favorite: {}", spot_name);
        }
        Ok(removed)
    }

    pub fn contains(&self, spot_name: &str) -> bool {
        self.list().iter().any(|f| f.spot_name() == spot_name)
    }

    fn save(&self, favorites: &[Forecast]) -> Result<(), FavoritesError> {
        let bytes = serde_json::to_vec(favorites)?;
        self.store.write(&self.key, &bytes)?;
        Ok(())
    }
}
