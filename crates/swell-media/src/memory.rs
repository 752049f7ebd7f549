use std::collections::HashMap;

use crate::backend::MediaBackend;
use crate::types::{MediaEntry, MediaRecord, MediaResult};

/// In-process backend that keeps insertion order per spot.
#[derive(Debug, Default)]
pub struct MemoryMediaBackend {
    collections: HashMap<String, Vec<MediaEntry>>,
}

impl MemoryMediaBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records stored for a spot, expired or not
    pub fn stored_count(&self, spot_key: &str) -> usize {
        self.collections.get(spot_key).map(Vec::len).unwrap_or(0)
    }
}

impl MediaBackend for MemoryMediaBackend {
    fn list(&self, spot_key: &str) -> MediaResult<Vec<MediaEntry>> {
        Ok(self.collections.get(spot_key).cloned().unwrap_or_default())
    }

    fn put(&mut self, spot_key: &str, media_id: &str, record: &MediaRecord) -> MediaResult<()> {
        let entries = self.collections.entry(spot_key.to_string()).or_default();
        match entries.iter_mut().find(|e| e.id == media_id) {
            Some(existing) => existing.record = record.clone(),
            None => entries.push(MediaEntry {
                id: media_id.to_string(),
                record: record.clone(),
            }),
        }
        Ok(())
    }

    fn delete(&mut self, spot_key: &str, media_id: &str) -> MediaResult<()> {
        if let Some(entries) = self.collections.get_mut(spot_key) {
            entries.retain(|e| e.id != media_id);
            if entries.is_empty() {
                self.collections.remove(spot_key);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn record(url: &str) -> MediaRecord {
        MediaRecord {
            media_url: url.to_string(),
            uploaded_at: "2025-01-01T00:00:00Z".to_string(),
            expiration_timestamp: 1.0,
        }
    }

    #[test]
    fn test_put_keeps_insertion_order_and_replaces_in_place() {
        let mut backend = MemoryMediaBackend::new();
        backend.put("spot", "a", &record("1")).unwrap();
        backend.put("spot", "b", &record("2")).unwrap();
        backend.put("spot", "a", &record("3")).unwrap();

        let entries = backend.list("spot").unwrap();
        let urls: Vec<_> = entries.iter().map(|e| e.record.media_url.as_str()).collect();
        assert_eq!(urls, vec!["3", "2"]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut backend = MemoryMediaBackend::new();
        backend.delete("spot", "nope").unwrap();
        backend.put("spot", "a", &record("1")).unwrap();
        backend.delete("spot", "a").unwrap();
        backend.delete("spot", "a").unwrap();
        assert_eq!(backend.stored_count("spot"), 0);
    }

    #[test]
    fn test_spots_are_isolated() {
        let mut backend = MemoryMediaBackend::new();
        backend.put("one", "a", &record("1")).unwrap();
        assert!(backend.list("two").unwrap().is_empty());
    }
}
