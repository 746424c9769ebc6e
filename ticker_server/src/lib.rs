//! Simulated coin price ticker.
//!
//! The crate wires together a small set of building blocks:
//!
//! - `model::series::SeriesStore`: the bounded, lock-guarded price series.
//! - `model::calendar`: market open hours, the daily reset window and the clock
//!   for the reference time zone.
//! - `model::price_model`: the asymmetric random walk producing new prices.
//! - `simulator::PriceSimulator`: the single writer, ticking on its own thread.
//! - `query`: the axum router serving `GET /data` from store snapshots.
//! - `tunnel`: optional cloudflared launcher.
//! - `config`: flags and environment settings read once at startup.

pub mod config;
pub mod model;
pub mod query;
pub mod simulator;
pub mod tunnel;
