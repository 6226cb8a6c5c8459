use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tickerplot::api::alphavantage::AlphaVantageClient;
use tickerplot::{router, AppConfig, AppState};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    let level = match &config {
        Ok(c) if c.debug => "debug",
        _ => "info",
    };

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tickerplot={},hyper=warn", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting tickerplot v{}", env!("CARGO_PKG_VERSION"));

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    if config.uses_dev_secret() {
        warn!("SESSION_SECRET not set, using development secret");
    }

    let client = match AlphaVantageClient::new(&config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create quote client: {}", e);
            return;
        }
    };

    let bind_addr = config.bind_addr;
    let app = router(AppState::new(client));

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_addr, e);
            return;
        }
    };

    info!("Listening on http://{}", bind_addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
