//! Expiry-aware access to a spot's media collection.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use swell_core::{sanitize_key, ExpiryMode, MediaConfig};

use crate::backend::{media_path, MediaBackend};
use crate::types::{MediaEntry, MediaError, MediaRecord, MediaResult};

/// Generate an id for a new upload.
pub fn new_media_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Media collection access with read-time expiry.
///
/// Backend calls run on the blocking pool so the async callers never
/// hold the backend lock across an await.
pub struct MediaStore<B> {
    backend: Arc<Mutex<B>>,
    retention: chrono::Duration,
    mode: ExpiryMode,
}

impl<B> Clone for MediaStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            retention: self.retention,
            mode: self.mode,
        }
    }
}

impl<B: MediaBackend + 'static> MediaStore<B> {
    /// Store with a 24 hour retention that prunes on read.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, &MediaConfig::default())
    }

    pub fn with_config(backend: B, config: &MediaConfig) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
            retention: chrono::Duration::seconds(config.retention_secs()),
            mode: config.expiry_mode,
        }
    }

    pub fn expiry_mode(&self) -> ExpiryMode {
        self.mode
    }

    /// Shared handle to the backend, e.g. for a background sweep.
    pub fn backend(&self) -> Arc<Mutex<B>> {
        Arc::clone(&self.backend)
    }

    /// Backend path of a record, using the sanitized spot name
    pub fn path_for(&self, spot_id: &str, media_id: &str) -> String {
        media_path(&sanitize_key(spot_id), media_id)
    }

    /// Unexpired records for a spot as of now.
    pub async fn list_active(&self, spot_id: &str) -> MediaResult<Vec<MediaEntry>> {
        self.list_active_at(spot_id, Utc::now()).await
    }

    /// Unexpired records for a spot as of `now`.
    ///
    /// In [`ExpiryMode::PruneOnRead`] every expired record is deleted before
    /// this returns. A failed delete is logged and retried on the next read.
    pub async fn list_active_at(
        &self,
        spot_id: &str,
        now: DateTime<Utc>,
    ) -> MediaResult<Vec<MediaEntry>> {
        let backend = Arc::clone(&self.backend);
        let key = sanitize_key(spot_id);
        let prune = self.mode == ExpiryMode::PruneOnRead;

        run_blocking(move || {
            let mut backend = backend.lock();
            let (expired, active): (Vec<_>, Vec<_>) = backend
                .list(&key)?
                .into_iter()
                .partition(|entry| entry.record.is_expired_at(now));

            if prune {
                for entry in &expired {
                    match backend.delete(&key, &entry.id) {
                        Ok(()) => {
                            tracing::debug!("Deleted expired media {}", media_path(&key, &entry.id))
                        }
                        Err(e) => tracing::warn!(
                            "Failed to delete expired media {}: {}",
                            media_path(&key, &entry.id),
                            e
                        ),
                    }
                }
            }

            tracing::debug!(
                "Media for {}: {} active, {} expired",
                key,
                active.len(),
                expired.len()
            );
            Ok(active)
        })
        .await
    }

    /// Record an upload for a spot; it expires one retention period after `uploaded_at`.
    ///
    /// Callers re-list to observe the new state.
    pub async fn record_upload(
        &self,
        spot_id: &str,
        media_id: &str,
        media_url: &str,
        uploaded_at: DateTime<Utc>,
    ) -> MediaResult<MediaRecord> {
        if media_id.is_empty() {
            return Err(MediaError::InvalidRecord("media id is empty".into()));
        }
        if media_url.trim().is_empty() {
            return Err(MediaError::InvalidRecord("media URL is empty".into()));
        }

        let record = MediaRecord::new(media_url, uploaded_at, self.retention);
        let backend = Arc::clone(&self.backend);
        let key = sanitize_key(spot_id);
        let media_id = media_id.to_string();
        let stored = record.clone();

        run_blocking(move || {
            backend.lock().put(&key, &media_id, &stored)?;
            tracing::info!("Recorded media {}", media_path(&key, &media_id));
            Ok(())
        })
        .await?;

        Ok(record)
    }

    /// Delete every expired record for a spot without reading the active set.
    ///
    /// This is the hook for a periodic sweep when reads run in
    /// [`ExpiryMode::FilterOnly`]. Returns the number of records removed.
    pub async fn sweep_expired(&self, spot_id: &str, now: DateTime<Utc>) -> MediaResult<usize> {
        let backend = Arc::clone(&self.backend);
        let key = sanitize_key(spot_id);

        run_blocking(move || {
            let mut backend = backend.lock();
            let expired: Vec<_> = backend
                .list(&key)?
                .into_iter()
                .filter(|entry| entry.record.is_expired_at(now))
                .collect();

            for entry in &expired {
                backend.delete(&key, &entry.id)?;
            }

            if !expired.is_empty() {
                tracing::info!("Swept {} expired media records for {}", expired.len(), key);
            }
            Ok(expired.len())
        })
        .await
    }
}

async fn run_blocking<T, F>(f: F) -> MediaResult<T>
where
    F: FnOnce() -> MediaResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| MediaError::TaskFailed(e.to_string()))?
}
