//! Open-Meteo marine API client.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use reqwest::Client;
use tokio::sync::oneshot;
use tracing::instrument;

use swell_core::ForecastConfig;

use crate::response::parse_forecast;
use crate::types::{Forecast, ForecastError, SurfSpot};

const MARINE_API_URL: &str = "https://marine-api.open-meteo.com/v1/marine";
const HOURLY_VARIABLES: &str = "wave_height,wave_direction,wave_period";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "SwellUpdate/0.1.0";

type Waiters = Vec<oneshot::Sender<Option<Forecast>>>;

/// Fetches the current forecast for a spot.
///
/// Concurrent requests for the same spot name share one outbound call.
/// Failures are logged and reported as `None`; use
/// [`ForecastClient::try_fetch_forecast`] to see why.
pub struct ForecastClient {
    client: Client,
    base_url: String,
    in_flight: Mutex<HashMap<String, Waiters>>,
}

impl ForecastClient {
    pub fn new() -> Result<Self, ForecastError> {
        Self::with_base_url(MARINE_API_URL, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn from_config(config: &ForecastConfig) -> Result<Self, ForecastError> {
        Self::with_base_url(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            in_flight: Mutex::new(HashMap::new()),
        })
    }

    /// Current forecast for `spot`, or `None` if it is unavailable for any reason.
    ///
    /// A spot without coordinates resolves immediately without a request.
    pub async fn fetch_forecast(&self, spot: &SurfSpot) -> Option<Forecast> {
        if spot.coordinates().is_none() {
            tracing::warn!("Invalid coordinates for {}", spot.name);
            return None;
        }

        let joined = {
            let mut in_flight = self.in_flight.lock();
            match in_flight.get_mut(&spot.name) {
                Some(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                None => {
                    in_flight.insert(spot.name.clone(), Vec::new());
                    None
                }
            }
        };

        if let Some(rx) = joined {
            tracing::debug!("Joining in-flight forecast request for {}", spot.name);
            return rx.await.ok().flatten();
        }

        let guard = InFlightGuard {
            in_flight: &self.in_flight,
            key: spot.name.clone(),
            done: false,
        };

        let result = match self.try_fetch_forecast(spot).await {
            Ok(forecast) => {
                tracing::info!(
                    "Forecast for {}: {:.2} m, {}",
                    spot.name,
                    forecast.wave_height(),
                    forecast.surf_rating()
                );
                Some(forecast)
            }
            Err(e) => {
                tracing::warn!("Forecast unavailable for {}: {}", spot.name, e);
                None
            }
        };

        guard.complete(&result);
        result
    }

    /// Issue one request for `spot` and report the precise failure.
    #[instrument(skip(self, spot), fields(spot = %spot.name), level = "debug")]
    pub async fn try_fetch_forecast(&self, spot: &SurfSpot) -> Result<Forecast, ForecastError> {
        let (latitude, longitude) = spot
            .coordinates()
            .ok_or_else(|| ForecastError::InvalidCoordinates(spot.name.clone()))?;

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", HOURLY_VARIABLES.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        tracing::debug!("Received {} bytes for {}", body.len(), spot.name);

        parse_forecast(&spot.name, &body, Utc::now())
    }

    /// Number of spots with a request currently outstanding
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().len()
    }
}

/// Clears the in-flight entry for a spot. If the leading request is dropped
/// before completing, joiners see their sender dropped and resolve to `None`.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashMap<String, Waiters>>,
    key: String,
    done: bool,
}

impl InFlightGuard<'_> {
    fn complete(mut self, result: &Option<Forecast>) {
        let waiters = self.in_flight.lock().remove(&self.key).unwrap_or_default();
        self.done = true;
        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.in_flight.lock().remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[tokio::test]
    async fn test_spot_without_coordinates_is_unavailable() {
        // Unroutable base URL: the call must short-circuit before any I/O.
        let client =
            ForecastClient::with_base_url("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        let spot = SurfSpot::new("Nowhere", "X");

        assert!(client.fetch_forecast(&spot).await.is_none());
        assert_eq!(client.in_flight_count(), 0);

        let err = client.try_fetch_forecast(&spot).await.unwrap_err();
        assert!(matches!(err, ForecastError::InvalidCoordinates(name) if name == "Nowhere"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ForecastClient::with_base_url("http://localhost:1234/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(client.base_url, "http://localhost:1234");
    }

    #[test]
    fn test_dropped_guard_clears_entry() {
        let map = Mutex::new(HashMap::new());
        map.lock().insert("Pipeline".to_string(), Vec::new());
        {
            let _guard = InFlightGuard {
                in_flight: &map,
                key: "Pipeline".to_string(),
                done: false,
            };
        }
        assert!(map.lock().is_empty());
    }

    #[tokio::test]
    async fn test_complete_notifies_waiters() {
        let map = Mutex::new(HashMap::new());
        let (tx, rx) = oneshot::channel();
        map.lock().insert("Pipeline".to_string(), vec![tx]);

        let guard = InFlightGuard {
            in_flight: &map,
            key: "Pipeline".to_string(),
            done: false,
        };
        guard.complete(&Some(Forecast::new("Pipeline", 3.0, 300.0, 14.0)));

        let received = rx.await.unwrap().unwrap();
        assert_eq!(received.wave_height(), 3.0);
        assert!(map.lock().is_empty());
    }
}
