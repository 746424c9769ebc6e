//! Domain models for the ticker server.
//!
//! - `series`: the bounded price series and its lock-guarded store.
//! - `calendar`: market open hours, daily reset window and the reference clock.
//! - `price_model`: the random-walk rule that produces the next price.

pub mod calendar;
pub mod price_model;
pub mod series;
