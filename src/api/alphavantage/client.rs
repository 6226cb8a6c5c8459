use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info, warn};

use super::models::{AlphaVantageError, QuoteResponse, RawResponse};
use super::parse::classify_body;
use crate::config::AppConfig;
use crate::models::{PriceHistory, TickerSymbol};

/// Performs the outbound GET for the client
///
/// Kept behind a trait so tests can answer with canned bodies.
#[async_trait]
pub trait QuoteTransport: Send + Sync {
    async fn get(&self, url: Url) -> Result<RawResponse, AlphaVantageError>;
}

/// `reqwest`-backed transport with a bounded request timeout
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, AlphaVantageError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("tickerplot/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AlphaVantageError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            timeout,
        })
    }

    fn map_error(&self, e: reqwest::Error) -> AlphaVantageError {
        if e.is_timeout() {
            AlphaVantageError::Timeout(self.timeout)
        } else {
            AlphaVantageError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl QuoteTransport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<RawResponse, AlphaVantageError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(RawResponse { status, body })
    }
}

/// Alpha Vantage daily quote-history client
#[derive(Clone)]
pub struct AlphaVantageClient {
    transport: Arc<dyn QuoteTransport>,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    /// Create a client that talks to the configured endpoint over HTTP
    pub fn new(config: &AppConfig) -> Result<Self, AlphaVantageError> {
        let transport = ReqwestTransport::new(config.request_timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with a custom transport (for testing)
    pub fn with_transport(config: &AppConfig, transport: Arc<dyn QuoteTransport>) -> Self {
        Self {
            transport,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// `TIME_SERIES_DAILY` request URL for a ticker
    pub fn daily_url(&self, ticker: &TickerSymbol) -> Result<Url, AlphaVantageError> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", ticker.as_str()),
                ("outputsize", "compact"),
                ("datatype", "csv"),
                ("apikey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| AlphaVantageError::InvalidUrl(format!("{}: {}", self.base_url, e)))
    }

    /// Fetch the compact daily history for a ticker
    ///
    /// # Returns
    /// * `Ok(PriceHistory)` - chronological daily records
    /// * `Err(AlphaVantageError::NotFound)` - upstream does not know the ticker
    /// * `Err(_)` - any other failure; none of them are retried
    pub async fn fetch_daily(&self, ticker: &TickerSymbol) -> Result<PriceHistory, AlphaVantageError> {
        let url = self.daily_url(ticker)?;
        debug!("Fetching daily history for {} from {}", ticker, self.base_url);

        let response = self.transport.get(url).await?;
        if response.status != 200 {
            warn!("Quote API answered {} for {}", response.status, ticker);
            return Err(AlphaVantageError::Status(response.status));
        }

        match classify_body(&response.body) {
            QuoteResponse::Data(history) => {
                debug!("Parsed {} daily records for {}", history.len(), ticker);
                Ok(history)
            }
            QuoteResponse::NotFound(message) => {
                info!("Ticker {} not found upstream: {}", ticker, message);
                Err(AlphaVantageError::NotFound(ticker.to_string()))
            }
            QuoteResponse::Malformed(reason) => Err(AlphaVantageError::Malformed(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Transport answering every request with the same response
    struct CannedTransport {
        response: Result<RawResponse, fn() -> AlphaVantageError>,
        requested: Mutex<Vec<Url>>,
    }

    impl CannedTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: Ok(RawResponse {
                    status,
                    body: body.to_string(),
                }),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn ok(body: &str) -> Self {
            Self {
                response: Ok(RawResponse::ok(body)),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> AlphaVantageError) -> Self {
            Self {
                response: Err(err),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QuoteTransport for CannedTransport {
        async fn get(&self, url: Url) -> Result<RawResponse, AlphaVantageError> {
            self.requested.lock().unwrap().push(url);
            match &self.response {
                Ok(r) => Ok(r.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn config() -> AppConfig {
        AppConfig::from_lookup(|k| match k {
            "ALPHA_VANTAGE_KEY" => Some("secret-key".to_string()),
            "ALPHA_VANTAGE_URL" => Some("https://quotes.test/query".to_string()),
            _ => None,
        })
        .unwrap()
    }

    fn client(transport: Arc<CannedTransport>) -> AlphaVantageClient {
        AlphaVantageClient::with_transport(&config(), transport)
    }

    #[test]
    fn test_daily_url_shape() {
        let client = client(Arc::new(CannedTransport::ok("")));
        let ticker = TickerSymbol::parse("ibm").unwrap();
        let url = client.daily_url(&ticker).unwrap();
        assert_eq!(
            url.as_str(),
            "https://quotes.test/query?function=TIME_SERIES_DAILY&symbol=IBM&outputsize=compact&datatype=csv&apikey=secret-key"
        );
    }

    #[tokio::test]
    async fn test_error_marker_under_200_is_not_found() {
        let transport = Arc::new(CannedTransport::ok(
            r#"{"Error Message": "Invalid API call."}"#,
        ));
        let ticker = TickerSymbol::parse("ZZZZ").unwrap();
        let err = client(transport.clone()).fetch_daily(&ticker).await.unwrap_err();
        assert!(matches!(err, AlphaVantageError::NotFound(ref t) if t == "ZZZZ"));
        assert_eq!(transport.requested.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_non_200_is_status_error() {
        let transport = Arc::new(CannedTransport::new(502, "timestamp,close\n2024-01-02,1\n"));
        let ticker = TickerSymbol::parse("IBM").unwrap();
        let err = client(transport).fetch_daily(&ticker).await.unwrap_err();
        assert!(matches!(err, AlphaVantageError::Status(502)));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let transport = Arc::new(CannedTransport::ok("timestamp,close\n2024-01-02,n/a\n"));
        let ticker = TickerSymbol::parse("IBM").unwrap();
        let err = client(transport).fetch_daily(&ticker).await.unwrap_err();
        assert!(matches!(err, AlphaVantageError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_passes_through() {
        let transport = Arc::new(CannedTransport::failing(|| {
            AlphaVantageError::Timeout(Duration::from_secs(10))
        }));
        let ticker = TickerSymbol::parse("IBM").unwrap();
        let err = client(transport).fetch_daily(&ticker).await.unwrap_err();
        assert!(matches!(err, AlphaVantageError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_valid_body_is_data() {
        let transport = Arc::new(CannedTransport::ok(
            "timestamp,open,high,low,close,volume\n2024-01-03,2,3,1,2.5,100\n2024-01-02,1,2,0.5,1.5,100\n",
        ));
        let ticker = TickerSymbol::parse("IBM").unwrap();
        let history = client(transport).fetch_daily(&ticker).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.records()[0].timestamp < history.records()[1].timestamp);
    }

    fn local_url(addr: std::net::SocketAddr) -> Url {
        Url::parse(&format!("http://{}/query", addr)).unwrap()
    }

    #[tokio::test]
    async fn test_reqwest_transport_reads_status_and_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let body = "timestamp,close\n";
            let reply = format!(
                "HTTP/1.1 503 Service Unavailable\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
        });

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let response = transport.get(local_url(addr)).await.unwrap();
        assert_eq!(response.status, 503);
        assert_eq!(response.body, "timestamp,close\n");
    }

    #[tokio::test]
    async fn test_reqwest_transport_times_out_on_silent_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold connections open without ever answering
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let timeout = Duration::from_millis(300);
        let transport = ReqwestTransport::new(timeout).unwrap();
        let err = transport.get(local_url(addr)).await.unwrap_err();
        assert!(matches!(err, AlphaVantageError::Timeout(t) if t == timeout), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_reqwest_transport_refused_connection() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let err = transport.get(local_url(addr)).await.unwrap_err();
        assert!(matches!(err, AlphaVantageError::Transport(_)), "got {:?}", err);
    }
}
