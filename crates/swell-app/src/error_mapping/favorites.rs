use crate::services::FavoritesServiceError;
use swell_core::{AppError, PersistenceError};

impl From<FavoritesServiceError> for AppError {
    fn from(e: FavoritesServiceError) -> Self {
        match e {
            FavoritesServiceError::Storage(s) => {
                AppError::Persistence(PersistenceError::WriteFailed(s))
            }
            FavoritesServiceError::Serialization(s) => {
                AppError::Persistence(PersistenceError::Corruption(s))
            }
            FavoritesServiceError::NoForecast(spot) => AppError::Service(format!(
                "No forecast available to save for {}",
                spot
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_failure_is_persistence_error() {
        let err: AppError = FavoritesServiceError::Storage("read-only".into()).into();
        assert!(matches!(
            err,
            AppError::Persistence(PersistenceError::WriteFailed(_))
        ));
        assert!(!err.user_message().is_empty());
    }
}
