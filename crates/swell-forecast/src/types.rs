use serde::{Deserialize, Deserializer, Serialize};

use crate::direction::CompassDirection;
use crate::rating::SurfRating;

/// A named beach location from the bundled catalog.
///
/// Coordinates are optional; a spot without both cannot be forecast or mapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfSpot {
    pub name: String,
    pub country: String,
    #[serde(rename = "lat", default, deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,
    #[serde(rename = "lng", default, deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,
}

impl SurfSpot {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Both coordinates, if the spot has them
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Spot name made safe for use as a storage path segment
    pub fn sanitized_name(&self) -> String {
        swell_core::sanitize_key(&self.name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Catalog files carry coordinates either as numbers or as numeric strings.
/// Anything else (null, a non-numeric string) decodes to `None`.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let value = match raw {
        Some(v) => serde_json::from_value::<NumberOrString>(v).ok(),
        None => None,
    };

    Ok(match value {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

/// Conditions at one spot for the sampled hour.
///
/// The rating is derived from wave height at construction and cannot be
/// set independently; a deserialized snapshot re-derives it as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredForecast")]
pub struct Forecast {
    #[serde(rename = "spotName")]
    spot_name: String,
    #[serde(rename = "waveHeight")]
    wave_height: f64,
    #[serde(rename = "waveDirection")]
    wave_direction: f64,
    #[serde(rename = "wavePeriod")]
    wave_period: f64,
    #[serde(rename = "surfRating")]
    surf_rating: SurfRating,
}

#[derive(Deserialize)]
struct StoredForecast {
    #[serde(rename = "spotName")]
    spot_name: String,
    #[serde(rename = "waveHeight")]
    wave_height: f64,
    #[serde(rename = "waveDirection")]
    wave_direction: f64,
    #[serde(rename = "wavePeriod")]
    wave_period: f64,
}

impl From<StoredForecast> for Forecast {
    fn from(s: StoredForecast) -> Self {
        Forecast::new(s.spot_name, s.wave_height, s.wave_direction, s.wave_period)
    }
}

impl Forecast {
    pub fn new(
        spot_name: impl Into<String>,
        wave_height: f64,
        wave_direction: f64,
        wave_period: f64,
    ) -> Self {
        Self {
            spot_name: spot_name.into(),
            wave_height,
            wave_direction,
            wave_period,
            surf_rating: SurfRating::from_wave_height(wave_height),
        }
    }

    pub fn spot_name(&self) -> &str {
        &self.spot_name
    }

    /// Wave height in meters
    pub fn wave_height(&self) -> f64 {
        self.wave_height
    }

    /// Wave direction in degrees
    pub fn wave_direction(&self) -> f64 {
        self.wave_direction
    }

    /// Wave period in seconds
    pub fn wave_period(&self) -> f64 {
        self.wave_period
    }

    pub fn surf_rating(&self) -> SurfRating {
        self.surf_rating
    }

    pub fn wave_direction_label(&self) -> CompassDirection {
        CompassDirection::from_degrees(self.wave_direction)
    }

    /// List row text, e.g. "Pipeline - Good"
    pub fn summary(&self) -> String {
        format!("{} - {}", self.spot_name, self.surf_rating)
    }
}

/// Forecast retrieval errors.
///
/// These never reach the UI as faults: the client logs them and reports
/// the forecast as unavailable.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Invalid coordinates for {0}")]
    InvalidCoordinates(String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Forecast API returned status {0}")]
    HttpStatus(u16),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("No forecast sample at or after the current time")]
    NoMatchingSample,
}
