//! Forecast list state for the spot screen.

use std::collections::HashMap;

use swell_core::AppError;
use swell_favorites::{BlobStore, FavoritesStore};
use swell_forecast::{Forecast, SpotCatalog, SurfSpot};

use crate::app_services::AppServices;
use crate::services::{toggle_favorite, FavoriteToggle, ForecastServiceMessage};

/// Shown wherever a forecast is unavailable.
pub const UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone)]
pub struct SpotRow {
    pub spot: SurfSpot,
    pub forecast: Option<Forecast>,
    pub loading: bool,
    pub favorite: bool,
}

impl SpotRow {
    pub fn rating_label(&self) -> &str {
        self.forecast
            .as_ref()
            .map_or(UNAVAILABLE, |f| f.surf_rating().as_str())
    }

    pub fn direction_label(&self) -> &'static str {
        self.forecast
            .as_ref()
            .map_or(UNAVAILABLE, |f| f.wave_direction_label().as_str())
    }

    pub fn wave_height_label(&self) -> String {
        self.forecast
            .as_ref()
            .map_or_else(|| UNAVAILABLE.to_string(), |f| format!("{:.1} m", f.wave_height()))
    }

    pub fn summary(&self) -> String {
        match &self.forecast {
            Some(f) => f.summary(),
            None => format!("{} - {}", self.spot.name, UNAVAILABLE),
        }
    }
}

/// One row per spot. Results are applied only if they answer the latest
/// request for that spot, so a slow stale fetch never overwrites a newer one.
#[derive(Debug, Default)]
pub struct ForecastBoard {
    rows: Vec<SpotRow>,
    /// Latest generation requested per spot name
    generations: HashMap<String, u64>,
    error_message: Option<String>,
}

impl ForecastBoard {
    pub fn new(spots: impl IntoIterator<Item = SurfSpot>) -> Self {
        let rows = spots
            .into_iter()
            .map(|spot| SpotRow {
                spot,
                forecast: None,
                loading: false,
                favorite: false,
            })
            .collect();
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn from_catalog(catalog: &SpotCatalog) -> Self {
        Self::new(catalog.spots().iter().cloned())
    }

    pub fn rows(&self) -> &[SpotRow] {
        &self.rows
    }

    pub fn row(&self, spot_name: &str) -> Option<&SpotRow> {
        self.rows.iter().find(|r| r.spot.name == spot_name)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.rows.iter().any(|r| r.loading)
    }

    /// Mark a spot as loading and return the generation its request must carry.
    pub fn begin_fetch(&mut self, spot_name: &str) -> Option<u64> {
        let row = self.rows.iter_mut().find(|r| r.spot.name == spot_name)?;
        row.loading = true;

        let generation = self.generations.entry(spot_name.to_string()).or_insert(0);
        *generation += 1;
        Some(*generation)
    }

    /// Apply one message. Returns false if it was stale or for an unknown spot.
    pub fn apply(&mut self, message: ForecastServiceMessage) -> bool {
        let ForecastServiceMessage::FetchDone {
            spot_name,
            generation,
            forecast,
        } = message;

        if self.generations.get(&spot_name) != Some(&generation) {
            tracing::debug!(
                "Ignoring superseded forecast for {} (generation {})",
                spot_name,
                generation
            );
            return false;
        }

        let Some(row) = self.rows.iter_mut().find(|r| r.spot.name == spot_name) else {
            return false;
        };
        row.loading = false;
        if forecast.is_none() {
            tracing::debug!("Forecast for {} unavailable, showing placeholder", spot_name);
        }
        row.forecast = forecast;
        true
    }

    /// Drain the forecast channel. Returns how many messages changed the board.
    pub fn poll_channel(&mut self, services: &AppServices) -> usize {
        let mut applied = 0;
        while let Some(message) = services.try_recv_forecast_message() {
            if self.apply(message) {
                applied += 1;
            }
        }
        applied
    }

    /// Request a fresh forecast for every spot.
    pub fn refresh(&mut self, services: &AppServices) -> usize {
        let names: Vec<String> = self.rows.iter().map(|r| r.spot.name.clone()).collect();
        let mut requests = Vec::with_capacity(names.len());
        for name in names {
            if let Some(generation) = self.begin_fetch(&name) {
                if let Some(row) = self.row(&name) {
                    requests.push((row.spot.clone(), generation));
                }
            }
        }
        services.request_batch(requests)
    }

    /// Request a fresh forecast for one spot. Any earlier request for it is superseded.
    pub fn refresh_spot(&mut self, services: &AppServices, spot_name: &str) -> bool {
        let Some(generation) = self.begin_fetch(spot_name) else {
            return false;
        };
        let Some(row) = self.row(spot_name) else {
            return false;
        };
        services.request_fetch(row.spot.clone(), generation);
        true
    }

    /// Mark rows whose spot is currently a favorite.
    pub fn sync_favorites<S: BlobStore>(&mut self, favorites: &FavoritesStore<S>) {
        let names: Vec<String> = favorites
            .list()
            .into_iter()
            .map(|f| f.spot_name().to_string())
            .collect();
        for row in &mut self.rows {
            row.favorite = names.iter().any(|n| *n == row.spot.name);
        }
    }

    /// Add or remove a spot from favorites.
    ///
    /// Failures are logged and kept as the board's error message; the row
    /// keeps its previous favorite state.
    pub fn toggle_favorite<S: BlobStore>(
        &mut self,
        favorites: &FavoritesStore<S>,
        spot_name: &str,
    ) -> Option<FavoriteToggle> {
        let row = self.rows.iter_mut().find(|r| r.spot.name == spot_name)?;

        match toggle_favorite(favorites, spot_name, row.forecast.as_ref()) {
            Ok(toggle) => {
                row.favorite = toggle == FavoriteToggle::Added;
                self.error_message = None;
                Some(toggle)
            }
            Err(e) => {
                tracing::error!("Failed to update favorites for {}: {}", spot_name, e);
                self.error_message = Some(AppError::from(e).user_message().to_string());
                None
            }
        }
    }
}
