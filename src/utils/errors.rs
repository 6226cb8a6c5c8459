use thiserror::Error;

use crate::api::alphavantage::AlphaVantageError;

/// Problems with the submitted form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("ticker is empty")]
    EmptyTicker,
    #[error("ticker '{0}' is not a valid symbol")]
    InvalidTicker(String),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart rendering failed: {0}")]
    Render(String),
}

/// Startup configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Everything the ticker-to-chart pipeline can fail with
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Quote(#[from] AlphaVantageError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

pub const EMPTY_TICKER_MESSAGE: &str = "Please enter a stock ticker";
pub const INVALID_TICKER_MESSAGE: &str = "Not a valid stock ticker";
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not load price data, please try again later";

impl AppError {
    /// Whether the failure was caused by the user rather than the system
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::Input(_) | AppError::Quote(AlphaVantageError::NotFound(_))
        )
    }

    /// Message shown in the flash notice
    ///
    /// System failures get a generic message; the detail only goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Input(InputError::EmptyTicker) => EMPTY_TICKER_MESSAGE.to_string(),
            AppError::Input(InputError::InvalidTicker(_)) => INVALID_TICKER_MESSAGE.to_string(),
            AppError::Quote(AlphaVantageError::NotFound(_)) => "Stock ticker not found".to_string(),
            AppError::Quote(_) | AppError::Chart(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
