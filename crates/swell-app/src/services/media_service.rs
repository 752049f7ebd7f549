//! Media listing and upload recording; results sent via mpsc.

use std::sync::mpsc::Sender;

use chrono::Utc;
use swell_media::{new_media_id, MediaBackend, MediaEntry, MediaError, MediaStore};

use super::TaskSpawner;

/// Error type for media operations
#[derive(Debug, Clone)]
pub enum MediaServiceError {
    /// Listing a spot's media failed
    ReadFailed(String),
    /// Recording an upload failed
    WriteFailed(String),
    InvalidRecord(String),
    ShuttingDown,
}

impl MediaServiceError {
    fn from_read(e: MediaError) -> Self {
        match e {
            MediaError::InvalidRecord(s) => MediaServiceError::InvalidRecord(s),
            other => MediaServiceError::ReadFailed(other.to_string()),
        }
    }

    fn from_write(e: MediaError) -> Self {
        match e {
            MediaError::InvalidRecord(s) => MediaServiceError::InvalidRecord(s),
            other => MediaServiceError::WriteFailed(other.to_string()),
        }
    }
}

impl std::fmt::Display for MediaServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaServiceError::ReadFailed(s) => write!(f, "Media read failed: {}", s),
            MediaServiceError::WriteFailed(s) => write!(f, "Media write failed: {}", s),
            MediaServiceError::InvalidRecord(s) => write!(f, "Invalid media: {}", s),
            MediaServiceError::ShuttingDown => write!(f, "Media service is shutting down"),
        }
    }
}

impl std::error::Error for MediaServiceError {}

/// Messages sent from media operations back to the presentation thread
#[derive(Debug, Clone)]
pub enum MediaServiceMessage {
    /// Active records for a spot, expired ones already filtered out
    ListDone {
        spot_name: String,
        result: Result<Vec<MediaEntry>, MediaServiceError>,
    },
    /// An upload was recorded (or not). Re-list to see the new state.
    UploadDone {
        spot_name: String,
        result: Result<MediaEntry, MediaServiceError>,
    },
}

impl MediaServiceMessage {
    /// Spot the message answers for
    pub fn spot_name(&self) -> &str {
        match self {
            MediaServiceMessage::ListDone { spot_name, .. }
            | MediaServiceMessage::UploadDone { spot_name, .. } => spot_name,
        }
    }
}

/// List a spot's active media. Sends `ListDone` when complete.
pub fn request_list_media<B: MediaBackend + 'static>(
    spawner: &TaskSpawner,
    tx: &Sender<MediaServiceMessage>,
    store: MediaStore<B>,
    spot_name: String,
) {
    let task_tx = tx.clone();
    let name = spot_name.clone();

    let spawned = spawner.spawn(async move {
        let result = store
            .list_active(&name)
            .await
            .map_err(MediaServiceError::from_read);
        if let Err(e) = &result {
            tracing::error!("Failed to list media for {}: {}", name, e);
        }
        let _ = task_tx.send(MediaServiceMessage::ListDone {
            spot_name: name,
            result,
        });
    });

    if !spawned {
        let _ = tx.send(MediaServiceMessage::ListDone {
            spot_name,
            result: Err(MediaServiceError::ShuttingDown),
        });
    }
}

/// Record an upload under a fresh media id. Sends `UploadDone` when complete.
///
/// `media_url` is the reference returned by whatever stored the bytes.
pub fn request_upload_media<B: MediaBackend + 'static>(
    spawner: &TaskSpawner,
    tx: &Sender<MediaServiceMessage>,
    store: MediaStore<B>,
    spot_name: String,
    media_url: String,
) {
    let task_tx = tx.clone();
    let name = spot_name.clone();

    let spawned = spawner.spawn(async move {
        let id = new_media_id();
        let result = store
            .record_upload(&name, &id, &media_url, Utc::now())
            .await
            .map(|record| MediaEntry { id, record })
            .map_err(MediaServiceError::from_write);
        if let Err(e) = &result {
            tracing::error!("Failed to record upload for {}: {}", name, e);
        }
        let _ = task_tx.send(MediaServiceMessage::UploadDone {
            spot_name: name,
            result,
        });
    });

    if !spawned {
        let _ = tx.send(MediaServiceMessage::UploadDone {
            spot_name,
            result: Err(MediaServiceError::ShuttingDown),
        });
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use std::time::Duration;
    use swell_media::MemoryMediaBackend;
    use tokio_util::sync::CancellationToken;

    fn spawner(runtime: &tokio::runtime::Runtime) -> TaskSpawner {
        TaskSpawner::new(runtime.handle().clone(), CancellationToken::new())
    }

    #[test]
    fn test_upload_then_list() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let spawner = spawner(&runtime);
        let store = MediaStore::new(MemoryMediaBackend::new());
        let (tx, rx) = std::sync::mpsc::channel();

        request_upload_media(
            &spawner,
            &tx,
            store.clone(),
            "Malibu".into(),
            "https://cdn.example/m.jpg".into(),
        );
        let uploaded = match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            MediaServiceMessage::UploadDone { spot_name, result } => {
                assert_eq!(spot_name, "Malibu");
                result.unwrap()
            }
            other => panic!("unexpected message: {:?}", other),
        };
        assert!(!uploaded.id.is_empty());

        request_list_media(&spawner, &tx, store, "Malibu".into());
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            MediaServiceMessage::ListDone { result, .. } => {
                assert_eq!(result.unwrap(), vec![uploaded]);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_empty_url_is_invalid_record() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let spawner = spawner(&runtime);
        let (tx, rx) = std::sync::mpsc::channel();

        request_upload_media(
            &spawner,
            &tx,
            MediaStore::new(MemoryMediaBackend::new()),
            "Malibu".into(),
            String::new(),
        );
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            MediaServiceMessage::UploadDone { result, .. } => {
                assert!(matches!(result, Err(MediaServiceError::InvalidRecord(_))));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_store_errors_keep_their_direction() {
        let read = MediaServiceError::from_read(MediaError::Storage("locked".into()));
        assert!(matches!(read, MediaServiceError::ReadFailed(_)));

        let write = MediaServiceError::from_write(MediaError::TaskFailed("panicked".into()));
        assert!(matches!(write, MediaServiceError::WriteFailed(_)));

        let invalid = MediaServiceError::from_write(MediaError::InvalidRecord("empty".into()));
        assert!(matches!(invalid, MediaServiceError::InvalidRecord(_)));
    }

    #[test]
    fn test_message_spot_name() {
        let message = MediaServiceMessage::UploadDone {
            spot_name: "Malibu".into(),
            result: Err(MediaServiceError::ShuttingDown),
        };
        assert_eq!(message.spot_name(), "Malibu");
    }

    #[test]
    fn test_media_error_display() {
        assert!(MediaServiceError::ReadFailed("locked".into())
            .to_string()
            .contains("locked"));
        assert!(MediaServiceError::ShuttingDown
            .to_string()
            .contains("shutting down"));
    }
}
