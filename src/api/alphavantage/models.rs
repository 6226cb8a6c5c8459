use std::time::Duration;

use thiserror::Error;

use crate::models::PriceHistory;

/// Status and body of one upstream response, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// What a `TIME_SERIES_DAILY` CSV body turned out to contain
///
/// Alpha Vantage answers an unknown symbol with HTTP 200 and an
/// `Error Message` body, so "not found" can only be told apart from data
/// by looking at the body.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteResponse {
    Data(PriceHistory),
    NotFound(String),
    Malformed(String),
}

/// Error type for quote-history requests
#[derive(Debug, Error)]
pub enum AlphaVantageError {
    /// Upstream reported the symbol as unknown
    #[error("ticker '{0}' not found")]
    NotFound(String),
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
}
