//! Classification and parsing of `TIME_SERIES_DAILY` CSV bodies.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use super::models::QuoteResponse;
use crate::models::{PriceHistory, PriceRecord};

/// Marker Alpha Vantage embeds in a 200 response for an unknown symbol
pub const ERROR_MARKER: &str = "Error Message";

/// Keys of the JSON notices upstream sends instead of CSV when throttling
const NOTICE_KEYS: [&str; 2] = ["Note", "Information"];

/// Classify a response body as data, an unknown ticker, or garbage
pub fn classify_body(body: &str) -> QuoteResponse {
    if body.contains(ERROR_MARKER) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get(ERROR_MARKER).and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());
        return QuoteResponse::NotFound(message);
    }

    if body.trim_start().starts_with('{') {
        let notice = serde_json::from_str::<Value>(body).ok().and_then(|v| {
            NOTICE_KEYS
                .iter()
                .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
        });
        return QuoteResponse::Malformed(
            notice.unwrap_or_else(|| "unexpected JSON response".to_string()),
        );
    }

    match parse_csv(body) {
        Ok(history) => QuoteResponse::Data(history),
        Err(reason) => QuoteResponse::Malformed(reason),
    }
}

/// Column indices of the fields a record is built from
struct Layout {
    width: usize,
    timestamp: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: Option<usize>,
    volume: Option<usize>,
}

impl Layout {
    fn from_header(columns: &[String]) -> Result<Self, String> {
        let find = |name: &str| columns.iter().position(|c| c == name);
        let timestamp = find("timestamp").ok_or("missing timestamp column")?;
        Ok(Self {
            width: columns.len(),
            timestamp,
            open: find("open"),
            high: find("high"),
            low: find("low"),
            close: find("close"),
            volume: find("volume"),
        })
    }
}

fn parse_csv(body: &str) -> Result<PriceHistory, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| format!("unreadable header: {}", e))?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    let layout = Layout::from_header(&columns)?;

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(|e| format!("row {}: {}", line + 1, e))?;
        if row.len() != layout.width {
            return Err(format!(
                "row {} has {} fields, header has {}",
                line + 1,
                row.len(),
                layout.width
            ));
        }

        let price = |idx: Option<usize>| -> Result<Option<f64>, String> {
            match idx {
                Some(i) => row[i]
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| format!("row {}: invalid number '{}'", line + 1, &row[i])),
                None => Ok(None),
            }
        };

        let timestamp = parse_timestamp(&row[layout.timestamp])
            .ok_or_else(|| format!("row {}: invalid timestamp '{}'", line + 1, &row[layout.timestamp]))?;

        records.push(PriceRecord {
            timestamp,
            open: price(layout.open)?,
            high: price(layout.high)?,
            low: price(layout.low)?,
            close: price(layout.close)?,
            volume: price(layout.volume)?,
        });
    }

    if records.is_empty() {
        return Err("no data rows".to_string());
    }

    Ok(PriceHistory::new(columns, records))
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS` as UTC
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
