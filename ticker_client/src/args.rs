//! Command-line arguments for the ticker client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use ticker_common::net::DEFAULT_PORT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the ticker server.
    #[clap(long, default_value_t = format!("http://127.0.0.1:{DEFAULT_PORT}"))]
    pub server_url: String,

    /// Seconds between polls of `/data`.
    #[clap(long, default_value_t = 150)]
    pub interval_secs: u64,

    /// Fetch once and exit instead of polling.
    #[clap(long)]
    pub once: bool,
}
