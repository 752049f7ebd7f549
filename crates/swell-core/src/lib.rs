pub mod config;
pub mod error;
pub mod keys;

pub use config::{
    CatalogConfig, Config, ExpiryMode, FavoritesConfig, ForecastConfig, MediaConfig,
    ValidationResult,
};
pub use error::{
    AppError, CatalogError, ConfigError, ForecastError, NetworkError, PersistenceError,
};
pub use keys::sanitize_key;

use anyhow::Result;

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

/// Initialize logging for the application
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("SwellUpdate core initialized");
    Ok(())
}

/// Initialize logging if nobody has done so yet. Safe to call repeatedly.
pub fn try_init() {
    if tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .try_init()
        .is_ok()
    {
        tracing::debug!("Tracing subscriber installed");
    }
}
