//! Background request functions.
//!
//! Each `request_*` function spawns its I/O on the runtime and reports the
//! outcome as a message on an mpsc channel. The presentation thread drains
//! those channels; nothing here touches presentation state directly.

pub mod favorites_service;
pub mod forecast_service;
pub mod media_service;

use std::future::Future;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

pub use favorites_service::{toggle_favorite, FavoriteToggle, FavoritesServiceError};
pub use forecast_service::{
    request_batch, request_fetch as request_forecast_fetch, ForecastServiceMessage,
};
pub use media_service::{
    request_list_media, request_upload_media, MediaServiceError, MediaServiceMessage,
};

/// Runtime handle plus the shutdown signal every spawned task observes.
#[derive(Clone)]
pub struct TaskSpawner {
    runtime: Handle,
    shutdown: CancellationToken,
}

impl TaskSpawner {
    pub fn new(runtime: Handle, shutdown: CancellationToken) -> Self {
        Self { runtime, shutdown }
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Spawn `task`, abandoning it if shutdown is signalled first.
    ///
    /// Returns false without spawning once shutdown has started.
    pub fn spawn<F>(&self, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_shut_down() {
            tracing::debug!("Not spawning task: shutdown in progress");
            return false;
        }

        let shutdown = self.shutdown.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => tracing::debug!("Task abandoned at shutdown"),
                _ = task => {}
            }
        });
        true
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_spawn_refused_after_shutdown() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let token = CancellationToken::new();
        let spawner = TaskSpawner::new(runtime.handle().clone(), token.clone());

        let (tx, rx) = std::sync::mpsc::channel();
        assert!(spawner.spawn(async move {
            let _ = tx.send(1);
        }));
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 1);

        token.cancel();
        assert!(spawner.is_shut_down());
        assert!(!spawner.spawn(async {}));
    }

    #[test]
    fn test_shutdown_abandons_running_task() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let token = CancellationToken::new();
        let spawner = TaskSpawner::new(runtime.handle().clone(), token.clone());

        let (tx, rx) = std::sync::mpsc::channel::<()>();
        spawner.spawn(async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            let _ = tx.send(());
        });

        token.cancel();
        // The sender is dropped with the abandoned task.
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }
}
