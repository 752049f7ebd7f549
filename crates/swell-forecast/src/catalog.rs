//! Bundled spot catalog: a JSON array of spots loaded once at startup.

use std::path::Path;

use thiserror::Error;

use crate::types::SurfSpot;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read spot catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode spot catalog: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct SpotCatalog {
    spots: Vec<SurfSpot>,
}

impl SpotCatalog {
    pub fn new(spots: Vec<SurfSpot>) -> Self {
        Self { spots }
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, CatalogError> {
        let spots: Vec<SurfSpot> = serde_json::from_slice(data)?;
        tracing::info!("Loaded {} surf spots", spots.len());
        Ok(Self { spots })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = std::fs::read(path).map_err(|e| {
            tracing::error!("Failed to load surf spot catalog {}: {}", path.display(), e);
            e
        })?;
        Self::from_slice(&data).map_err(|e| {
            tracing::error!("Error decoding surf spot catalog: {}", e);
            e
        })
    }

    pub fn spots(&self) -> &[SurfSpot] {
        &self.spots
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&SurfSpot> {
        self.spots.iter().find(|s| s.name == name)
    }

    /// Spots whose name contains `query`, ignoring case. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&SurfSpot> {
        let needle = query.trim().to_lowercase();
        self.spots
            .iter()
            .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Spots that can be placed on a map (and forecast)
    pub fn mappable(&self) -> impl Iterator<Item = &SurfSpot> {
        self.spots.iter().filter(|s| s.coordinates().is_some())
    }
}
