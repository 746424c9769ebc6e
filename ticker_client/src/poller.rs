//! Polling the ticker server's `/data` endpoint.
//!
//! `DataPoller` fetches the series over HTTP; `summarize` reduces it to what the
//! client prints: current price, lowest price of the series and market status.
use log::{error, info, warn};
use reqwest::blocking::Client;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;
use ticker_common::net::data_url;
use ticker_common::{MarketData, TickerError};

/// Price shown before any point exists.
pub const FALLBACK_PRICE: i64 = 5000;
/// Sleep granularity, so Ctrl+C is noticed without waiting out a whole interval.
const SHUTDOWN_POLL: Duration = Duration::from_millis(200);

/// What one poll reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub current_price: i64,
    pub lowest_price: Option<i64>,
    pub points: usize,
    pub last_label: Option<String>,
    pub market_open: bool,
}

/// Reduce a `/data` payload to the printed summary.
pub fn summarize(data: &MarketData) -> Summary {
    Summary {
        current_price: data.prices.last().copied().unwrap_or(FALLBACK_PRICE),
        lowest_price: data.prices.iter().min().copied(),
        points: data.prices.len(),
        last_label: data.timestamps.last().cloned(),
        market_open: data.market_open,
    }
}

/// Blocking HTTP poller for one server.
pub struct DataPoller {
    client: Client,
    url: String,
}

impl DataPoller {
    pub fn new(server_url: &str) -> Result<Self, TickerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TickerError::Http(e.to_string()))?;
        Ok(Self {
            client,
            url: data_url(server_url),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode `/data` once.
    pub fn fetch(&self) -> Result<MarketData, TickerError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .map_err(|e| TickerError::Http(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TickerError::Http(format!("server responded {status}")));
        }
        let body = response.bytes().map_err(|e| TickerError::Http(e.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch and log one summary. Errors are logged, not returned.
    pub fn poll_once(&self) {
        match self.fetch() {
            Ok(data) => report(&summarize(&data)),
            Err(e) => error!("Fetching {} failed: {}", self.url, e),
        }
    }

    /// Poll every `interval` until `shutdown` is set.
    pub fn run(&self, interval: Duration, shutdown: Arc<AtomicBool>) {
        info!("Polling {} every {:?}", self.url, interval);
        while !shutdown.load(Ordering::Relaxed) {
            self.poll_once();
            let mut waited = Duration::ZERO;
            while waited < interval && !shutdown.load(Ordering::Relaxed) {
                thread::sleep(SHUTDOWN_POLL);
                waited += SHUTDOWN_POLL;
            }
        }
        info!("Poller stopping...");
    }
}

fn report(summary: &Summary) {
    info!(
        "PRICE: current={} lowest={} points={} last={}",
        summary.current_price,
        summary
            .lowest_price
            .map_or_else(|| "-".to_string(), |p| p.to_string()),
        summary.points,
        summary.last_label.as_deref().unwrap_or("-"),
    );
    if !summary.market_open {
        warn!("Market closed, prices are frozen");
    }
}
