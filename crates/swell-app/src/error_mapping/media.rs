use crate::services::MediaServiceError;
use swell_core::{AppError, PersistenceError};

impl From<MediaServiceError> for AppError {
    fn from(e: MediaServiceError) -> Self {
        match e {
            MediaServiceError::ReadFailed(s) => {
                AppError::Persistence(PersistenceError::ReadFailed(s))
            }
            MediaServiceError::WriteFailed(s) => {
                AppError::Persistence(PersistenceError::WriteFailed(s))
            }
            MediaServiceError::InvalidRecord(s) => AppError::Validation(s),
            MediaServiceError::ShuttingDown => AppError::Service("Media service stopped".into()),
        }
    }
}
