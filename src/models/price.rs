//! Daily price history models

use chrono::{DateTime, Utc};

use super::series::Series;

/// One row of daily price data
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub timestamp: DateTime<Utc>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl PriceRecord {
    pub fn value(&self, series: Series) -> Option<f64> {
        match series {
            Series::Open => self.open,
            Series::Close => self.close,
            Series::High => self.high,
            Series::Low => self.low,
        }
    }
}

/// A ticker's price history in chronological order
///
/// Fields are private so a history cannot be reordered or edited once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    columns: Vec<String>,
    records: Vec<PriceRecord>,
}

impl PriceHistory {
    /// Create a history from the source header and its rows, sorting rows by timestamp
    pub fn new(columns: Vec<String>, mut records: Vec<PriceRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self { columns, records }
    }

    /// Header columns exactly as they appeared in the source
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source carried a column for this series
    pub fn has_series(&self, series: Series) -> bool {
        self.columns.iter().any(|c| c == series.column())
    }

    /// `(timestamp, value)` points for one series, or `None` if the column is absent
    pub fn points(&self, series: Series) -> Option<Vec<(DateTime<Utc>, f64)>> {
        if !self.has_series(series) {
            return None;
        }
        Some(
            self.records
                .iter()
                .filter_map(|r| r.value(series).map(|v| (r.timestamp, v)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(day: u32, close: f64) -> PriceRecord {
        PriceRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
            open: None,
            high: None,
            low: None,
            close: Some(close),
            volume: None,
        }
    }

    #[test]
    fn test_records_sorted_on_creation() {
        let history = PriceHistory::new(
            vec!["timestamp".into(), "close".into()],
            vec![record(5, 3.0), record(1, 1.0), record(3, 2.0)],
        );
        let closes: Vec<f64> = history.records().iter().filter_map(|r| r.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_points_for_missing_column() {
        let history = PriceHistory::new(
            vec!["timestamp".into(), "close".into()],
            vec![record(1, 1.0)],
        );
        assert!(history.has_series(Series::Close));
        assert!(!history.has_series(Series::Open));
        assert!(history.points(Series::Open).is_none());
        assert_eq!(history.points(Series::Close).unwrap().len(), 1);
    }
}
