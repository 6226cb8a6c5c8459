//! Ticker symbol models

use std::fmt;

use crate::utils::errors::InputError;

const MAX_TICKER_LEN: usize = 12;
/// How much of a rejected ticker is kept for error messages
const MAX_ECHO_CHARS: usize = 16;

/// A normalized (trimmed, uppercased) ticker symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Normalize raw user input into a ticker symbol
    ///
    /// Accepts ASCII letters, digits, `.` and `-` (e.g. `BRK.B`, `RDS-A`).
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let ticker = raw.trim().to_uppercase();

        if ticker.is_empty() {
            return Err(InputError::EmptyTicker);
        }

        let well_formed = ticker.len() <= MAX_TICKER_LEN
            && ticker
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if !well_formed {
            return Err(InputError::InvalidTicker(ticker.chars().take(MAX_ECHO_CHARS).collect()));
        }

        Ok(Self(ticker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_whitespace_and_case() {
        let ticker = TickerSymbol::parse("  aapl ").unwrap();
        assert_eq!(ticker.as_str(), "AAPL");
    }

    #[test]
    fn test_empty_ticker_rejected() {
        assert_eq!(TickerSymbol::parse("   "), Err(InputError::EmptyTicker));
        assert_eq!(TickerSymbol::parse(""), Err(InputError::EmptyTicker));
    }

    #[test]
    fn test_punctuated_symbols_allowed() {
        assert_eq!(TickerSymbol::parse("brk.b").unwrap().to_string(), "BRK.B");
        assert_eq!(TickerSymbol::parse("rds-a").unwrap().to_string(), "RDS-A");
    }

    #[test]
    fn test_query_characters_rejected() {
        assert!(matches!(
            TickerSymbol::parse("AAPL&apikey=x"),
            Err(InputError::InvalidTicker(_))
        ));
        assert!(matches!(
            TickerSymbol::parse("ABCDEFGHIJKLMNOP"),
            Err(InputError::InvalidTicker(_))
        ));
    }

    #[test]
    fn test_rejected_ticker_is_truncated() {
        let pasted = "ß".repeat(3000);
        match TickerSymbol::parse(&pasted) {
            Err(InputError::InvalidTicker(echo)) => assert_eq!(echo.chars().count(), MAX_ECHO_CHARS),
            other => panic!("expected invalid ticker, got {:?}", other),
        }
    }
}
