//! Favorites screen state.

use swell_core::AppError;
use swell_favorites::{BlobStore, FavoritesStore};
use swell_forecast::Forecast;

use crate::services::FavoritesServiceError;

#[derive(Debug, Default)]
pub struct FavoritesList {
    entries: Vec<Forecast>,
    error_message: Option<String>,
}

impl FavoritesList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Forecast] {
        &self.entries
    }

    /// Row text for each favorite, e.g. "Pipeline - Good"
    pub fn summaries(&self) -> Vec<String> {
        self.entries.iter().map(Forecast::summary).collect()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn reload<S: BlobStore>(&mut self, store: &FavoritesStore<S>) {
        self.entries = store.list();
    }

    /// Remove the favorite at `index` and reload.
    pub fn remove_at<S: BlobStore>(&mut self, store: &FavoritesStore<S>, index: usize) -> bool {
        let Some(name) = self.entries.get(index).map(|f| f.spot_name().to_string()) else {
            return false;
        };

        match store.remove(&name) {
            Ok(_) => {
                self.error_message = None;
                self.reload(store);
                true
            }
            Err(e) => {
                tracing::error!("Failed to remove favorite {}: {}", name, e);
                let e = AppError::from(FavoritesServiceError::from(e));
                self.error_message = Some(e.user_message().to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use swell_favorites::MemoryBlobStore;

    #[test]
    fn test_reload_and_remove() {
        let store = FavoritesStore::new(MemoryBlobStore::new());
        store.add(&Forecast::new("Pipeline", 4.5, 300.0, 14.0)).unwrap();
        store.add(&Forecast::new("Malibu", 1.0, 250.0, 9.0)).unwrap();

        let mut list = FavoritesList::new();
        list.reload(&store);
        assert_eq!(list.summaries(), vec!["Pipeline - Excellent", "Malibu - Poor"]);

        assert!(list.remove_at(&store, 0));
        assert_eq!(list.summaries(), vec!["Malibu - Poor"]);
        assert!(!list.remove_at(&store, 5));
    }
}
