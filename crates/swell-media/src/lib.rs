//! Time-bounded media metadata for surf spots.
//!
//! Each spot owns a collection at `Media/{sanitized spot}/{media id}`.
//! Records expire a fixed time after upload and are hidden (and by default
//! deleted) the next time the collection is read.

pub mod backend;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod types;

pub use backend::{media_path, MediaBackend};
pub use memory::MemoryMediaBackend;
pub use sqlite::SqliteMediaBackend;
pub use store::{new_media_id, MediaStore};
pub use swell_core::{sanitize_key, ExpiryMode};
pub use types::{MediaEntry, MediaError, MediaRecord, MediaResult};
