pub mod client;
pub mod models;
pub mod parse;

pub use client::{AlphaVantageClient, QuoteTransport, ReqwestTransport};
pub use models::{AlphaVantageError, QuoteResponse, RawResponse};
pub use parse::classify_body;
