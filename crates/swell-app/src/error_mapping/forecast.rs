use swell_core::error::ReqwestErrorExt;
use swell_core::{AppError, ForecastError as CoreForecastError, NetworkError};
use swell_forecast::ForecastError;

/// `ForecastError` lives in another crate, so this is a function rather than a `From` impl.
pub fn from_forecast_error(e: ForecastError) -> AppError {
    match e {
        ForecastError::InvalidCoordinates(spot) => {
            AppError::Forecast(CoreForecastError::InvalidCoordinates(spot))
        }
        ForecastError::Transport(e) => AppError::Network(e.into_network_error()),
        ForecastError::HttpStatus(status) => AppError::Network(NetworkError::ServerError {
            status,
            message: format!("Forecast API returned status {}", status),
        }),
        ForecastError::MalformedResponse(s) => {
            AppError::Forecast(CoreForecastError::MalformedResponse(s))
        }
        ForecastError::NoMatchingSample => AppError::Forecast(CoreForecastError::NoMatchingSample),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_errors_keep_their_category() {
        assert!(matches!(
            from_forecast_error(ForecastError::NoMatchingSample),
            AppError::Forecast(CoreForecastError::NoMatchingSample)
        ));
        assert!(matches!(
            from_forecast_error(ForecastError::HttpStatus(502)),
            AppError::Network(NetworkError::ServerError { status: 502, .. })
        ));
        assert!(matches!(
            from_forecast_error(ForecastError::InvalidCoordinates("Secret Spot".into())),
            AppError::Forecast(CoreForecastError::InvalidCoordinates(_))
        ));
    }
}
