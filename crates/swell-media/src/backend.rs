//! Media storage backend trait.
//!
//! Backends see only sanitized spot keys; [`crate::MediaStore`] does the
//! sanitizing and the expiry bookkeeping.

use crate::types::{MediaEntry, MediaRecord, MediaResult};

/// Path of one record in the remote media tree.
pub fn media_path(spot_key: &str, media_id: &str) -> String {
    format!("Media/{}/{}", spot_key, media_id)
}

/// Trait for media metadata backends.
///
/// Writes are whole-record replacements; concurrent writers race and the
/// last write wins.
pub trait MediaBackend: Send {
    /// All records under `spot_key` in backend order.
    fn list(&self, spot_key: &str) -> MediaResult<Vec<MediaEntry>>;

    /// Create or replace the record at `Media/{spot_key}/{media_id}`.
    fn put(&mut self, spot_key: &str, media_id: &str, record: &MediaRecord) -> MediaResult<()>;

    /// Remove a record. Deleting a missing record is not an error.
    fn delete(&mut self, spot_key: &str, media_id: &str) -> MediaResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_path() {
        assert_eq!(media_path("St_ Ives", "abc"), "Media/St_ Ives/abc");
    }
}
