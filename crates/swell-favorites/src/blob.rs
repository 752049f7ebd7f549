//! Key/value byte storage for whole-value persistence.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Minimal persistence seam: one opaque value per key, replaced on every write.
pub trait BlobStore: Send + Sync {
    /// Value under `key`, or `None` if nothing was ever written.
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    fn write(&self, key: &str, value: &[u8]) -> io::Result<()>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", swell_core::sanitize_key(key)))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, value: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write beside the target then rename so a crash never leaves half a file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }
}

/// In-process store (for testing)
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> io::Result<()> {
        self.values.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path().join("nested"));
        assert!(store.read("FavoriteSurfSpots").unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path().join("nested"));

        store.write("FavoriteSurfSpots", b"[1]").unwrap();
        store.write("FavoriteSurfSpots", b"[1,2]").unwrap();

        assert_eq!(store.read("FavoriteSurfSpots").unwrap().unwrap(), b"[1,2]");
        assert!(dir.path().join("nested/FavoriteSurfSpots.json").exists());
        assert!(!dir.path().join("nested/FavoriteSurfSpots.json.tmp").exists());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryBlobStore::new();
        assert!(store.read("k").unwrap().is_none());
        store.write("k", b"v").unwrap();
        assert_eq!(store.read("k").unwrap().unwrap(), b"v");
    }
}
