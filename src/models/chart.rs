//! Chart generation models

use chrono::{DateTime, Utc};

use super::series::Series;

/// A single data point on a price chart
pub type PricePoint = (DateTime<Utc>, f64);

/// One visual line of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    pub series: Series,
    pub color: (u8, u8, u8),
    pub legend: &'static str,
    pub points: Vec<PricePoint>,
}

/// Render-only description of a price chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub lines: Vec<ChartLine>,
    /// Every timestamp in the history, used for the x range and the hover readout
    pub timestamps: Vec<DateTime<Utc>>,
}

impl ChartSpec {
    pub fn series(&self) -> Vec<Series> {
        self.lines.iter().map(|l| l.series).collect()
    }
}

/// Embeddable output of the chart builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartFragments {
    pub script: String,
    pub markup: String,
}
