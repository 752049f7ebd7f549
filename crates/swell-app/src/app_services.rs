//! Application services container.
//!
//! `AppServices` owns the runtime, the forecast client, the media and
//! favorites stores, and the service channels. It is built explicitly from
//! a `Config` and handed to whoever needs it; there is no global instance.

use std::collections::{HashMap, VecDeque};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use swell_core::{AppError, Config};
use swell_favorites::{FavoritesStore, FileBlobStore};
use swell_forecast::{ForecastClient, SpotCatalog, SurfSpot};
use swell_media::{MediaStore, SqliteMediaBackend};

use crate::error_mapping::{from_catalog_error, from_forecast_error};
use crate::services::{self, TaskSpawner};

pub use crate::services::{ForecastServiceMessage, MediaServiceMessage};

pub type Favorites = FavoritesStore<FileBlobStore>;

/// Media results waiting to be picked up, grouped by spot.
struct MediaInbox {
    rx: Receiver<MediaServiceMessage>,
    pending: HashMap<String, VecDeque<MediaServiceMessage>>,
}

impl MediaInbox {
    fn new(rx: Receiver<MediaServiceMessage>) -> Self {
        Self {
            rx,
            pending: HashMap::new(),
        }
    }

    /// Move everything off the channel, then take the oldest message for `spot_name`.
    fn take(&mut self, spot_name: &str) -> Option<MediaServiceMessage> {
        while let Ok(message) = self.rx.try_recv() {
            self.pending
                .entry(message.spot_name().to_string())
                .or_default()
                .push_back(message);
        }

        let queue = self.pending.get_mut(spot_name)?;
        let message = queue.pop_front();
        if queue.is_empty() {
            self.pending.remove(spot_name);
        }
        message
    }
}

pub struct AppServices {
    /// Tokio runtime for async operations
    runtime: tokio::runtime::Runtime,

    /// Cancelled on shutdown; spawned tasks stop at their next await
    shutdown: CancellationToken,

    config: Config,

    /// Spot catalog, empty if it could not be loaded
    catalog: SpotCatalog,

    /// Why the catalog is empty, if it failed to load
    catalog_error: Option<AppError>,

    forecast_client: Arc<ForecastClient>,

    media_store: MediaStore<SqliteMediaBackend>,

    favorites: Arc<Favorites>,

    forecast_service_tx: Sender<ForecastServiceMessage>,
    forecast_service_rx: Mutex<Receiver<ForecastServiceMessage>>,

    media_service_tx: Sender<MediaServiceMessage>,
    media_inbox: Mutex<MediaInbox>,
}

impl AppServices {
    /// Build every service from `config`.
    ///
    /// Fails on an invalid config or if the media database cannot be opened.
    /// A missing or malformed spot catalog is not fatal: the catalog is left
    /// empty and the error is kept for display.
    pub fn new(config: Config) -> Result<Self> {
        swell_core::try_init();

        let validation = config.validate();
        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }
        if !validation.is_valid() {
            anyhow::bail!("Invalid configuration: {}", validation.error_summary());
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("swell-tokio")
            .build()
            .context("Failed to create tokio runtime")?;

        let (catalog, catalog_error) = match SpotCatalog::load(&config.catalog_path()) {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                let e = from_catalog_error(e);
                tracing::error!("Spot catalog unavailable: {}", e);
                (SpotCatalog::default(), Some(e))
            }
        };

        let forecast_client = ForecastClient::from_config(&config.forecast)
            .map_err(from_forecast_error)
            .context("Failed to create forecast client")?;

        let db_path = config.media_database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create media database directory {:?}", parent)
            })?;
        }
        let backend = SqliteMediaBackend::new(&db_path)
            .with_context(|| format!("Failed to open media database at {:?}", db_path))?;
        tracing::info!("Media database opened at {:?}", db_path);
        let media_store = MediaStore::with_config(backend, &config.media);

        let favorites = FavoritesStore::with_config(
            FileBlobStore::new(config.favorites_dir()),
            &config.favorites,
        );

        let (forecast_service_tx, forecast_service_rx) = channel();
        let (media_service_tx, media_service_rx) = channel();

        tracing::info!(
            "App services ready: {} spots, media expiry {:?}",
            catalog.len(),
            config.media.expiry_mode
        );

        Ok(Self {
            runtime,
            shutdown: CancellationToken::new(),
            config,
            catalog,
            catalog_error,
            forecast_client: Arc::new(forecast_client),
            media_store,
            favorites: Arc::new(favorites),
            forecast_service_tx,
            forecast_service_rx: Mutex::new(forecast_service_rx),
            media_service_tx,
            media_inbox: Mutex::new(MediaInbox::new(media_service_rx)),
        })
    }

    /// Get the tokio runtime handle.
    pub fn runtime(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn spawner(&self) -> TaskSpawner {
        TaskSpawner::new(self.runtime(), self.shutdown.clone())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &SpotCatalog {
        &self.catalog
    }

    pub fn catalog_error(&self) -> Option<&AppError> {
        self.catalog_error.as_ref()
    }

    pub fn forecast_client(&self) -> Arc<ForecastClient> {
        Arc::clone(&self.forecast_client)
    }

    pub fn media_store(&self) -> MediaStore<SqliteMediaBackend> {
        self.media_store.clone()
    }

    pub fn favorites(&self) -> Arc<Favorites> {
        Arc::clone(&self.favorites)
    }

    /// Signal shutdown. Outstanding tasks are abandoned and new requests
    /// answer immediately with an unavailable result.
    pub fn shutdown(&self) {
        tracing::info!("AppServices shutdown initiated");
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    // =========== Forecast Service ===========

    pub fn request_fetch(&self, spot: SurfSpot, generation: u64) {
        services::request_forecast_fetch(
            &self.spawner(),
            &self.forecast_service_tx,
            self.forecast_client(),
            spot,
            generation,
        );
    }

    pub fn request_batch(&self, spots: impl IntoIterator<Item = (SurfSpot, u64)>) -> usize {
        services::request_batch(
            &self.spawner(),
            &self.forecast_service_tx,
            &self.forecast_client,
            spots,
        )
    }

    /// Try to receive a message from the forecast service channel (non-blocking).
    pub fn try_recv_forecast_message(&self) -> Option<ForecastServiceMessage> {
        self.forecast_service_rx.lock().try_recv().ok()
    }

    // =========== Media Service ===========

    pub fn request_list_media(&self, spot_name: &str) {
        services::request_list_media(
            &self.spawner(),
            &self.media_service_tx,
            self.media_store(),
            spot_name.to_string(),
        );
    }

    pub fn request_upload_media(&self, spot_name: &str, media_url: &str) {
        services::request_upload_media(
            &self.spawner(),
            &self.media_service_tx,
            self.media_store(),
            spot_name.to_string(),
            media_url.to_string(),
        );
    }

    /// Take the next media result for `spot_name` (non-blocking).
    ///
    /// Results for other spots stay queued until their own caller asks.
    pub fn try_recv_media_message(&self, spot_name: &str) -> Option<MediaServiceMessage> {
        self.media_inbox.lock().take(spot_name)
    }
}

impl Drop for AppServices {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
