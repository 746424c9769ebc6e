//! Ticker HTTP server.
//!
//! Starts the price simulator thread, optionally launches the tunnel, and
//! serves the series over HTTP until Ctrl+C.
//!
//! Concurrency:
//! - The simulator owns all writes to the shared `SeriesStore` and runs on a
//!   plain OS thread with a blocking sleep between ticks.
//! - Request handlers run on the tokio runtime and only ever take snapshots.
use clap::Parser;
use log::{error, info};
use std::sync::Arc;
use ticker_common::{Result, TickerError};
use ticker_server::config::Config;
use ticker_server::model::calendar::minute_label;
use ticker_server::model::price_model::PiecewiseWalk;
use ticker_server::model::series::SeriesStore;
use ticker_server::query::{AppState, cors_layer, router};
use ticker_server::simulator::PriceSimulator;
use ticker_server::tunnel::TunnelLauncher;

#[tokio::main]
async fn main() -> Result<(), TickerError> {
    init_logger();
    let config = Config::parse();
    let clock = config.clock()?;
    let calendar = config.calendar()?;
    let cors = cors_layer(&config.origins())?;

    let store = Arc::new(SeriesStore::seeded(minute_label(&clock.now())));
    info!(
        "Series seeded in {}, reset window: {}",
        clock.tz(),
        calendar
            .reset_window
            .map_or_else(|| "none".to_string(), |w| w.to_string())
    );

    PriceSimulator::new(Arc::clone(&store), calendar, clock, PiecewiseWalk::from_os_rng())
        .start(config.interval());

    if config.tunnel {
        TunnelLauncher::new(config.port).start();
    }

    let app = router(AppState::new(store, calendar, clock), cors);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Ticker server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Ctrl+C received. Shutting down server...");
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
