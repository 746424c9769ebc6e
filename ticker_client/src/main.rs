//! Ticker Client: polls the ticker server's `/data` endpoint and logs the current
//! price, the lowest price in the series and whether the market is open.
//!
//! Usage example (CLI):
//! ```bash
//! ticker_client --server-url http://192.168.0.10:8080 --interval-secs 150
//! ```
#![warn(missing_docs)]
mod args;
mod poller;

use crate::args::Args;
use crate::poller::DataPoller;
use clap::Parser;
use log::info;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use ticker_common::{Result, TickerError};

fn main() -> Result<(), TickerError> {
    init_logger();
    let args = Args::parse();
    let poller = DataPoller::new(args.server_url.trim())?;

    if args.once {
        let data = poller.fetch()?;
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| TickerError::Format(format!("failed to set Ctrl+C handler: {e}")))?;
    }

    info!("Client is running. Press Ctrl+C to exit.");
    poller.run(Duration::from_secs(args.interval_secs.max(1)), shutdown);
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
