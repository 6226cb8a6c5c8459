use tracing::info;

use crate::api::alphavantage::AlphaVantageClient;
use crate::models::{ChartFragments, ChartSpec, SeriesSelection, TickerSymbol};
use crate::services::chart_service;
use crate::utils::errors::AppError;

/// Result of a successful ticker-to-chart run
#[derive(Debug, Clone)]
pub struct ChartResult {
    pub ticker: TickerSymbol,
    pub spec: ChartSpec,
    pub fragments: ChartFragments,
}

/// Normalize the ticker, fetch its daily history, and draw the selected series
pub async fn build_chart(
    client: &AlphaVantageClient,
    raw_ticker: &str,
    selection: &SeriesSelection,
) -> Result<ChartResult, AppError> {
    let ticker = TickerSymbol::parse(raw_ticker)?;
    info!("Charting {} with {} series", ticker, selection.len());

    let history = client.fetch_daily(&ticker).await?;
    let (spec, fragments) = chart_service::generate_chart(&history, &ticker, selection)?;

    Ok(ChartResult {
        ticker,
        spec,
        fragments,
    })
}
