//! Startup configuration for the ticker server.
//!
//! Every setting can come from a flag or from the environment variable named in
//! its `env` attribute; flags win. Values are read once in `main`.
use crate::model::calendar::{
    MarketCalendar, MarketClock, MarketHours, ResetWindow, parse_reset_setting,
};
use clap::Parser;
use std::time::Duration;
use ticker_common::Result;
use ticker_common::net::{DEFAULT_PORT, addr};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Simulated coin price ticker", long_about = None)]
pub struct Config {
    /// Interface to bind the HTTP server to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP port.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Seconds between simulator ticks.
    #[arg(long, env = "UPDATE_SECONDS", default_value_t = 300)]
    pub interval_secs: u64,

    /// IANA name of the reference time zone.
    #[arg(long, env = "TICKER_TZ", default_value = "Asia/Seoul")]
    pub timezone: String,

    /// Daily reset window as `HH:MM-HH:MM` (same hour, end exclusive), or `none`.
    #[arg(long, env = "RESET_WINDOW", default_value = "17:00-17:05")]
    pub reset_window: String,

    /// Hour the market opens (inclusive).
    #[arg(long, env = "MARKET_OPEN_HOUR", default_value_t = 17)]
    pub open_hour: u32,

    /// Hour the market closes (exclusive); may be earlier than the open hour.
    #[arg(long, env = "MARKET_CLOSE_HOUR", default_value_t = 1)]
    pub close_hour: u32,

    /// Comma-separated origins allowed to call the API. Empty allows any origin.
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Launch a cloudflared tunnel pointing at the HTTP port.
    #[arg(long, env = "START_TUNNEL")]
    pub tunnel: bool,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        addr(&self.host, self.port)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    pub fn clock(&self) -> Result<MarketClock> {
        MarketClock::from_name(&self.timezone)
    }

    pub fn reset_window(&self) -> Result<Option<ResetWindow>> {
        parse_reset_setting(&self.reset_window)
    }

    pub fn calendar(&self) -> Result<MarketCalendar> {
        let hours = MarketHours::new(self.open_hour, self.close_hour)?;
        Ok(MarketCalendar::new(hours, self.reset_window()?))
    }

    /// Allowed origins with blanks removed.
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect()
    }
}
