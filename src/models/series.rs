//! Price series selection models

use std::str::FromStr;

use tracing::debug;

/// One named price column of daily data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    Open,
    Close,
    High,
    Low,
}

/// Display styling for a charted series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    pub color: (u8, u8, u8),
    pub legend: &'static str,
}

impl Series {
    /// All series in form-field order
    pub const ALL: [Series; 4] = [Series::Open, Series::Close, Series::High, Series::Low];

    /// Column name in the upstream CSV header (also the form field name)
    pub fn column(&self) -> &'static str {
        match self {
            Series::Open => "open",
            Series::Close => "close",
            Series::High => "high",
            Series::Low => "low",
        }
    }

    pub fn style(&self) -> SeriesStyle {
        match self {
            Series::Open => SeriesStyle { color: (0, 0, 255), legend: "Open" },
            Series::Close => SeriesStyle { color: (255, 0, 0), legend: "Adj Close" },
            Series::High => SeriesStyle { color: (255, 165, 0), legend: "High" },
            Series::Low => SeriesStyle { color: (0, 0, 0), legend: "Low" },
        }
    }
}

impl FromStr for Series {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Series::Open),
            "close" => Ok(Series::Close),
            "high" => Ok(Series::High),
            "low" => Ok(Series::Low),
            other => Err(format!("unknown series '{}'", other)),
        }
    }
}

/// Ordered, de-duplicated set of series to plot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesSelection {
    series: Vec<Series>,
}

impl SeriesSelection {
    /// Build a selection from raw names, dropping anything that is not a known series
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut selection = Self::default();
        for name in names {
            match name.parse::<Series>() {
                Ok(series) => selection.insert(series),
                Err(e) => debug!("Ignoring series selection: {}", e),
            }
        }
        selection
    }

    pub fn insert(&mut self, series: Series) {
        if !self.series.contains(&series) {
            self.series.push(series);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Series> + '_ {
        self.series.iter().copied()
    }

    pub fn contains(&self, series: Series) -> bool {
        self.series.contains(&series)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
