//! Data models for the ticker chart pipeline
//!
//! Each model lives only for the duration of one request.

pub mod chart;
pub mod price;
pub mod series;
pub mod ticker;

// Re-export commonly used types for convenience
pub use chart::{ChartFragments, ChartLine, ChartSpec, PricePoint};
pub use price::{PriceHistory, PriceRecord};
pub use series::{Series, SeriesSelection, SeriesStyle};
pub use ticker::TickerSymbol;
