//! Forecast fetching off the presentation thread; results sent via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use swell_forecast::{Forecast, ForecastClient, SurfSpot};

use super::TaskSpawner;

/// Messages sent from forecast fetches back to the presentation thread
#[derive(Debug, Clone)]
pub enum ForecastServiceMessage {
    /// One fetch finished. `forecast` is `None` when it was unavailable.
    FetchDone {
        spot_name: String,
        generation: u64,
        forecast: Option<Forecast>,
    },
}

/// Fetch one spot's forecast. Sends `FetchDone` tagged with `generation`.
///
/// If the runtime is shutting down, `FetchDone` is sent immediately with no
/// forecast so the caller never waits on a request that will not run.
pub fn request_fetch(
    spawner: &TaskSpawner,
    tx: &Sender<ForecastServiceMessage>,
    client: Arc<ForecastClient>,
    spot: SurfSpot,
    generation: u64,
) {
    let task_tx = tx.clone();
    let spot_name = spot.name.clone();

    let spawned = spawner.spawn(async move {
        let forecast = client.fetch_forecast(&spot).await;
        let _ = task_tx.send(ForecastServiceMessage::FetchDone {
            spot_name: spot.name,
            generation,
            forecast,
        });
    });

    if !spawned {
        let _ = tx.send(ForecastServiceMessage::FetchDone {
            spot_name,
            generation,
            forecast: None,
        });
    }
}

/// Fetch several spots at once. Each completes independently and may
/// arrive in any order.
pub fn request_batch(
    spawner: &TaskSpawner,
    tx: &Sender<ForecastServiceMessage>,
    client: &Arc<ForecastClient>,
    spots: impl IntoIterator<Item = (SurfSpot, u64)>,
) -> usize {
    let mut count = 0;
    for (spot, generation) in spots {
        request_fetch(spawner, tx, Arc::clone(client), spot, generation);
        count += 1;
    }
    tracing::debug!("Requested {} forecasts", count);
    count
}
