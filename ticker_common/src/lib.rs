//!
//! Common types and utilities shared by the ticker server and client.
//!
//! This crate aggregates:
//! - `error`: unified error type `TickerError` used across the workspace.
//! - `result`: handy `Result<T, TickerError>` alias.
//! - `market_data`: the JSON payload served on `/data` and read by the client.
//! - `net`: networking defaults and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod market_data;
pub mod net;
pub mod result;

pub use error::TickerError;
pub use market_data::MarketData;
pub use result::Result;
