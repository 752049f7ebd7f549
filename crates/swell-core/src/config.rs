use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_DIR_NAME: &str = "swellupdate";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a single-line summary of all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Remote marine forecast API
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Spot media metadata store
    #[serde(default)]
    pub media: MediaConfig,

    /// Local favorites list
    #[serde(default)]
    pub favorites: FavoritesConfig,

    /// Bundled spot catalog
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Base URL of the Open-Meteo marine endpoint
    #[serde(default = "default_forecast_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_forecast_api_url() -> String {
    "https://marine-api.open-meteo.com/v1/marine".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            api_url: default_forecast_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// What a media read does with records whose expiry has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryMode {
    /// Hide expired records and delete them from the backing store.
    #[default]
    PruneOnRead,
    /// Hide expired records only; deletion is left to a sweep.
    FilterOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// How long an uploaded record stays visible
    #[serde(default = "default_retention_hours")]
    pub retention_hours: u32,

    /// SQLite file name, relative to the config directory
    #[serde(default = "default_media_database_file")]
    pub database_file: String,

    #[serde(default)]
    pub expiry_mode: ExpiryMode,
}

fn default_retention_hours() -> u32 {
    24
}

fn default_media_database_file() -> String {
    "media.db".to_string()
}

impl MediaConfig {
    pub fn retention_secs(&self) -> i64 {
        i64::from(self.retention_hours) * 3600
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            retention_hours: default_retention_hours(),
            database_file: default_media_database_file(),
            expiry_mode: ExpiryMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Key under which the whole favorites list is persisted
    #[serde(default = "default_favorites_key")]
    pub storage_key: String,
}

fn default_favorites_key() -> String {
    "FavoriteSurfSpots".to_string()
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            storage_key: default_favorites_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Spot catalog JSON; relative paths resolve against the config directory
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "surfspots.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);

        Self {
            config_dir,
            forecast: ForecastConfig::default(),
            media: MediaConfig::default(),
            favorites: FavoritesConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the user config directory, creating a default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, writing defaults there if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let mut config = Self::default();
            if let Some(parent) = path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and fail on validation errors; warnings are logged.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.forecast.api_url, "forecast.api_url", &mut result);

        if self.forecast.request_timeout_secs == 0 {
            result.add_error(
                "forecast.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        } else if self.forecast.request_timeout_secs > 120 {
            result.add_warning(
                "forecast.request_timeout_secs",
                "Request timeout is unusually long (>120s)",
            );
        }

        if self.media.retention_hours == 0 {
            result.add_error(
                "media.retention_hours",
                "Media retention must be at least one hour",
            );
        } else if self.media.retention_hours > 24 * 7 {
            result.add_warning(
                "media.retention_hours",
                "Media retention is more than 7 days",
            );
        }

        if self.media.database_file.trim().is_empty() {
            result.add_error("media.database_file", "Database file name is empty");
        }

        if self.favorites.storage_key.trim().is_empty() {
            result.add_error("favorites.storage_key", "Storage key is empty");
        }

        let catalog = self.catalog_path();
        if !catalog.exists() {
            result.add_warning(
                "catalog.path",
                format!("Spot catalog does not exist: {}", catalog.display()),
            );
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the user config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Resolved location of the spot catalog
    pub fn catalog_path(&self) -> PathBuf {
        self.resolve(&self.catalog.path)
    }

    /// Resolved location of the media database
    pub fn media_database_path(&self) -> PathBuf {
        self.resolve(&self.media.database_file)
    }

    /// Directory holding persisted favorites
    pub fn favorites_dir(&self) -> PathBuf {
        self.config_dir.join("favorites")
    }

    fn resolve(&self, value: &str) -> PathBuf {
        let path = PathBuf::from(value);
        if path.is_absolute() {
            path
        } else {
            self.config_dir.join(path)
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.forecast.api_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "forecast.api_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.forecast.api_url = "ftp://marine.example.com".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.forecast.request_timeout_secs = 0;
        let result = config.validate();
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "forecast.request_timeout_secs"));
    }

    #[test]
    fn test_retention_bounds() {
        let mut config = Config::default();
        config.media.retention_hours = 0;
        assert!(!config.validate().is_valid());

        config.media.retention_hours = 24 * 30;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "media.retention_hours"));
    }

    #[test]
    fn test_default_retention_is_one_day() {
        assert_eq!(MediaConfig::default().retention_secs(), 86_400);
    }

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let mut config = Config::default();
        config.config_dir = PathBuf::from("/tmp/swell");
        assert_eq!(config.catalog_path(), PathBuf::from("/tmp/swell/surfspots.json"));
        assert_eq!(config.media_database_path(), PathBuf::from("/tmp/swell/media.db"));

        config.catalog.path = "/opt/spots.json".to_string();
        assert_eq!(config.catalog_path(), PathBuf::from("/opt/spots.json"));
    }

    #[test]
    fn test_load_from_writes_defaults_then_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.config_dir, dir.path());

        let mut edited = created.clone();
        edited.media.expiry_mode = ExpiryMode::FilterOnly;
        edited.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.media.expiry_mode, ExpiryMode::FilterOnly);
        assert_eq!(loaded.favorites.storage_key, "FavoriteSurfSpots");
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let config: Config = toml::from_str("config_dir = \"/tmp/swell\"\n").unwrap();
        assert_eq!(config.forecast.request_timeout_secs, 10);
        assert_eq!(config.media.expiry_mode, ExpiryMode::PruneOnRead);
    }
}
