//! Form-driven web page that charts daily stock prices.
//!
//! A request flows handler -> Alpha Vantage fetch -> chart builder; see
//! [`services::quote_service::build_chart`].

pub mod api;
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use handlers::{router, AppState};
