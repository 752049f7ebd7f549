//! Open-Meteo marine response decoding and current-sample selection.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::types::{Forecast, ForecastError};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Body of `GET /v1/marine?hourly=wave_height,wave_direction,wave_period`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarineResponse {
    /// Offset of the `hourly.time` strings when the request used `timezone=auto`
    #[serde(default)]
    pub utc_offset_seconds: Option<i32>,
    pub hourly: Option<HourlySeries>,
}

/// Parallel per-hour sequences. Values are null over land grid cells.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlySeries {
    pub time: Option<Vec<String>>,
    pub wave_height: Option<Vec<Option<f64>>>,
    pub wave_direction: Option<Vec<Option<f64>>>,
    pub wave_period: Option<Vec<Option<f64>>>,
}

/// Decode a raw response body and build the forecast for the hour at or after `now`.
pub fn parse_forecast(
    spot_name: &str,
    body: &[u8],
    now: DateTime<Utc>,
) -> Result<Forecast, ForecastError> {
    let response: MarineResponse = serde_json::from_slice(body)
        .map_err(|e| ForecastError::MalformedResponse(e.to_string()))?;
    response.current_forecast(spot_name, now)
}

impl MarineResponse {
    pub fn current_forecast(
        &self,
        spot_name: &str,
        now: DateTime<Utc>,
    ) -> Result<Forecast, ForecastError> {
        let hourly = self
            .hourly
            .as_ref()
            .ok_or_else(|| ForecastError::MalformedResponse("missing hourly block".into()))?;

        let offset = self.offset()?;

        let (Some(times), Some(heights), Some(directions), Some(periods)) = (
            hourly.time.as_deref(),
            hourly.wave_height.as_deref(),
            hourly.wave_direction.as_deref(),
            hourly.wave_period.as_deref(),
        ) else {
            tracing::debug!("Incomplete hourly data for {}", spot_name);
            return Err(ForecastError::NoMatchingSample);
        };

        let index =
            select_sample_index(times, offset, now)?.ok_or(ForecastError::NoMatchingSample)?;

        let sample = |series: &[Option<f64>]| series.get(index).copied().flatten();
        match (sample(heights), sample(directions), sample(periods)) {
            (Some(height), Some(direction), Some(period)) => {
                tracing::debug!(
                    "Selected sample {} ({}) for {}",
                    index,
                    times[index],
                    spot_name
                );
                Ok(Forecast::new(spot_name, height, direction, period))
            }
            _ => {
                tracing::debug!("Sample {} for {} is missing wave values", index, spot_name);
                Err(ForecastError::NoMatchingSample)
            }
        }
    }

    fn offset(&self) -> Result<FixedOffset, ForecastError> {
        let secs = self.utc_offset_seconds.unwrap_or(0);
        FixedOffset::east_opt(secs).ok_or_else(|| {
            ForecastError::MalformedResponse(format!("utc_offset_seconds out of range: {}", secs))
        })
    }
}

/// Index of the first sample whose instant is at or after `now`.
///
/// Timestamps are compared as instants rather than strings so that mixed
/// offsets cannot misorder samples. The series is assumed ascending.
pub fn select_sample_index(
    times: &[String],
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> Result<Option<usize>, ForecastError> {
    for (index, raw) in times.iter().enumerate() {
        let instant = parse_timestamp(raw, offset).ok_or_else(|| {
            ForecastError::MalformedResponse(format!("unreadable timestamp: {}", raw))
        })?;
        if instant >= now {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Parse an API timestamp.
///
/// Accepts RFC 3339, minute-precision UTC (`2025-01-01T00:00Z`), and the
/// offset-less local form Open-Meteo emits for `timezone=auto`.
pub fn parse_timestamp(raw: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(stripped) = raw.strip_suffix('Z') {
        return parse_naive(stripped).map(|naive| naive.and_utc());
    }

    let naive = parse_naive(raw)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
