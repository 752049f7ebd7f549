//! Centralized error types for SwellUpdate.
//!
//! Every domain crate reports failures with its own error enum; the app
//! layer converts them into [`AppError`] so the presentation code can ask
//! for a `user_message()` without knowing where the failure came from.
//! No variant here is fatal: the caller shows a placeholder and moves on.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Spot catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input the user supplied was rejected before anything was stored.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Service-level errors that arrive from background tasks as plain text.
    #[error("Service error: {0}")]
    Service(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Forecast(e) => e.user_message(),
            AppError::Persistence(e) => e.user_message(),
            AppError::Catalog(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Validation(_) => {
                "Some details were missing or invalid. Please check and try again."
            }
            AppError::Service(_) => "Something went wrong. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The forecast server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Forecast availability errors.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Spot has no coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Malformed forecast response: {0}")]
    MalformedResponse(String),

    #[error("No forecast sample at or after the current time")]
    NoMatchingSample,
}

impl ForecastError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ForecastError::InvalidCoordinates(_) => "This spot has no location for forecasts.",
            ForecastError::MalformedResponse(_) => "Forecast data was unreadable. Showing N/A.",
            ForecastError::NoMatchingSample => "No current forecast available. Showing N/A.",
        }
    }
}

/// Favorites and media storage errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),
}

impl PersistenceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PersistenceError::ReadFailed(_) => "Saved data could not be loaded.",
            PersistenceError::WriteFailed(_) => "Your change could not be saved.",
            PersistenceError::Corruption(_) => {
                "Saved data may be corrupted. Consider resetting app data."
            }
        }
    }
}

/// Bundled spot catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Spot catalog not found: {0}")]
    NotFound(String),

    #[error("Spot catalog decode failed: {0}")]
    DecodeFailure(String),
}

impl CatalogError {
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "Surf spot list is missing.",
            CatalogError::DecodeFailure(_) => "Surf spot list could not be read.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

/// Extension trait for converting rusqlite errors to our error types.
pub trait RusqliteErrorExt {
    fn into_persistence_error(self) -> PersistenceError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_persistence_error(self) -> PersistenceError {
        match &self {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                PersistenceError::Corruption(self.to_string())
            }
            rusqlite::Error::QueryReturnedNoRows | rusqlite::Error::InvalidColumnType(..) => {
                PersistenceError::ReadFailed(self.to_string())
            }
            _ => PersistenceError::WriteFailed(self.to_string()),
        }
    }
}
