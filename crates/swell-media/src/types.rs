use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use swell_core::error::RusqliteErrorExt;
use thiserror::Error;

/// Metadata for one externally stored photo or video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    #[serde(rename = "mediaURL")]
    pub media_url: String,
    /// RFC 3339 upload time
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: String,
    /// Seconds since the Unix epoch after which the record is gone
    #[serde(rename = "expirationTimestamp")]
    pub expiration_timestamp: f64,
}

impl MediaRecord {
    pub fn new(
        media_url: impl Into<String>,
        uploaded_at: DateTime<Utc>,
        retention: chrono::Duration,
    ) -> Self {
        Self {
            media_url: media_url.into(),
            uploaded_at: uploaded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            expiration_timestamp: epoch_seconds(uploaded_at + retention),
        }
    }

    /// A record is active only while its expiration lies strictly in the future.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_timestamp <= epoch_seconds(now)
    }
}

/// A record together with its id inside the spot's collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEntry {
    pub id: String,
    pub record: MediaRecord,
}

pub(crate) fn epoch_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / 1000.0
}

#[derive(Debug, Error)]
pub enum MediaError {
    /// The backing store rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid media record: {0}")]
    InvalidRecord(String),

    /// The blocking worker running the backend call died.
    #[error("Media task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for MediaError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(e.into_persistence_error().to_string())
    }
}

pub type MediaResult<T> = Result<T, MediaError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_new_record_expires_after_retention() {
        let uploaded = at("2025-03-01T08:00:00Z");
        let record = MediaRecord::new("https://cdn/x.jpg", uploaded, chrono::Duration::hours(24));
        assert_eq!(record.uploaded_at, "2025-03-01T08:00:00Z");
        assert_eq!(
            record.expiration_timestamp,
            uploaded.timestamp() as f64 + 86_400.0
        );
    }

    #[test]
    fn test_expiry_boundary() {
        let uploaded = at("2025-03-01T08:00:00Z");
        let record = MediaRecord::new("u", uploaded, chrono::Duration::hours(24));
        let expiry = uploaded + chrono::Duration::hours(24);

        assert!(!record.is_expired_at(expiry - chrono::Duration::seconds(1)));
        assert!(record.is_expired_at(expiry));
        assert!(record.is_expired_at(expiry + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_wire_field_names() {
        let record = MediaRecord::new("u", at("2025-03-01T08:00:00Z"), chrono::Duration::hours(1));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["mediaURL"], "u");
        assert!(value.get("uploadedAt").is_some());
        assert!(value.get("expirationTimestamp").is_some());
    }
}
