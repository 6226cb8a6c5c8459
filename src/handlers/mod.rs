use axum::routing::get;
use axum::Router;

use crate::api::alphavantage::AlphaVantageClient;

pub mod about;
pub mod index;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub client: AlphaVantageClient,
}

impl AppState {
    pub fn new(client: AlphaVantageClient) -> Self {
        Self { client }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::show).post(index::submit))
        .route("/about", get(about::show))
        .with_state(state)
}
