//! Locally persisted favorite spots.
//!
//! The whole list lives in one serialized blob under a single key; every
//! operation reads it, mutates it and writes it back.

pub mod blob;
pub mod store;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use store::{FavoritesError, FavoritesStore};
