//! SQLite-backed media metadata.

use rusqlite::{params, Connection};
use std::path::Path;

use crate::backend::MediaBackend;
use crate::types::{MediaEntry, MediaRecord, MediaResult};

/// SQLite media backend. Rows keep their rowid on overwrite, so listing by
/// rowid preserves first-insertion order.
pub struct SqliteMediaBackend {
    conn: Connection,
}

impl SqliteMediaBackend {
    /// Open or create the database at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        let backend = Self { conn };
        backend.init_schema()?;
        Ok(backend)
    }

    /// Create an in-memory backend (for testing).
    pub fn in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        let backend = Self { conn };
        backend.init_schema()?;
        Ok(backend)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS media (
                spot_key TEXT NOT NULL,
                media_id TEXT NOT NULL,
                media_url TEXT NOT NULL,
                uploaded_at TEXT NOT NULL,
                expiration_timestamp REAL NOT NULL,
                PRIMARY KEY (spot_key, media_id)
            );

            CREATE INDEX IF NOT EXISTS idx_media_spot ON media(spot_key);
            "#,
        )?;
        Ok(())
    }
}

impl MediaBackend for SqliteMediaBackend {
    fn list(&self, spot_key: &str) -> MediaResult<Vec<MediaEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT media_id, media_url, uploaded_at, expiration_timestamp
             FROM media WHERE spot_key = ?1 ORDER BY rowid ASC",
        )?;

        let rows = stmt.query_map(params![spot_key], |row| {
            Ok(MediaEntry {
                id: row.get(0)?,
                record: MediaRecord {
                    media_url: row.get(1)?,
                    uploaded_at: row.get(2)?,
                    expiration_timestamp: row.get(3)?,
                },
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn put(&mut self, spot_key: &str, media_id: &str, record: &MediaRecord) -> MediaResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO media (spot_key, media_id, media_url, uploaded_at, expiration_timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(spot_key, media_id) DO UPDATE SET
                media_url = excluded.media_url,
                uploaded_at = excluded.uploaded_at,
                expiration_timestamp = excluded.expiration_timestamp
            "#,
            params![
                spot_key,
                media_id,
                record.media_url,
                record.uploaded_at,
                record.expiration_timestamp,
            ],
        )?;
        Ok(())
    }

    fn delete(&mut self, spot_key: &str, media_id: &str) -> MediaResult<()> {
        self.conn.execute(
            "DELETE FROM media WHERE spot_key = ?1 AND media_id = ?2",
            params![spot_key, media_id],
        )?;
        Ok(())
    }
}
