use swell_core::{AppError, CatalogError as CoreCatalogError};
use swell_forecast::CatalogError;

pub fn from_catalog_error(e: CatalogError) -> AppError {
    match e {
        CatalogError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
            AppError::Catalog(CoreCatalogError::NotFound(e.to_string()))
        }
        CatalogError::Io(e) => AppError::Io(e),
        CatalogError::Decode(e) => {
            AppError::Catalog(CoreCatalogError::DecodeFailure(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_decode_failure() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(matches!(
            from_catalog_error(CatalogError::Decode(err)),
            AppError::Catalog(CoreCatalogError::DecodeFailure(_))
        ));
    }

    #[test]
    fn test_missing_catalog() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "surfspots.json");
        assert!(matches!(
            from_catalog_error(CatalogError::Io(err)),
            AppError::Catalog(CoreCatalogError::NotFound(_))
        ));
    }
}
