//! Background price simulator.
//!
//! `PriceSimulator` runs on a dedicated thread and is the only writer of the
//! shared `SeriesStore`. Every tick it:
//!
//! 1. reads wall-clock time in the reference zone,
//! 2. clears and reseeds the series when inside the reset window and no reset
//!    has happened yet on that calendar day,
//! 3. appends a new price from the `PriceModel` while the market is open, and
//!    otherwise leaves the series alone,
//! 4. sleeps for the configured interval.
//!
//! Steps 2 and 3 run inside one `SeriesStore::transaction`, so a reader never
//! sees a freshly reset series that is still waiting for its first tick price.
//! The loop has no stop signal; it lives as long as the process.

use crate::model::calendar::{MarketCalendar, MarketClock, minute_label};
use crate::model::price_model::PriceModel;
use crate::model::series::{SEED_PRICE, SeriesStore};
use chrono::{NaiveDate, NaiveDateTime};
use log::{error, info};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use ticker_common::Result;

/// Default pause between ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);

/// What the market side of a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketState {
    /// Market open; `price` was appended.
    Open { price: i64 },
    /// Market closed; nothing was appended.
    Closed,
}

/// Report of a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// The series was cleared and reseeded during this tick.
    pub reset: bool,
    pub state: MarketState,
    /// `"HH:MM"` label used for any point written by this tick.
    pub label: String,
}

/// Timed writer of the price series.
pub struct PriceSimulator<M> {
    store: Arc<SeriesStore>,
    calendar: MarketCalendar,
    clock: MarketClock,
    model: M,
    last_reset: Option<NaiveDate>,
}

impl<M: PriceModel> PriceSimulator<M> {
    pub fn new(
        store: Arc<SeriesStore>,
        calendar: MarketCalendar,
        clock: MarketClock,
        model: M,
    ) -> Self {
        Self {
            store,
            calendar,
            clock,
            model,
            last_reset: None,
        }
    }

    /// Pretend a reset already happened on `date`.
    pub fn with_last_reset(mut self, date: NaiveDate) -> Self {
        self.last_reset = Some(date);
        self
    }

    pub fn last_reset(&self) -> Option<NaiveDate> {
        self.last_reset
    }

    /// Run one tick for local time `now` in the reference zone.
    pub fn tick(&mut self, now: NaiveDateTime) -> Result<TickOutcome> {
        let label = minute_label(&now);
        let today = now.date();
        let reset = self.calendar.should_reset_market(&now) && self.last_reset != Some(today);
        let open = self.calendar.is_market_open(&now);
        let model = &mut self.model;

        let state = self.store.transaction(|series| {
            if reset {
                series.reset(SEED_PRICE, label.as_str());
            }
            if open {
                let price = model.next_price(series.last_price());
                series.append(price, label.as_str());
                MarketState::Open { price }
            } else {
                MarketState::Closed
            }
        })?;

        if reset {
            self.last_reset = Some(today);
        }
        Ok(TickOutcome {
            reset,
            state,
            label,
        })
    }
}

impl<M: PriceModel + 'static> PriceSimulator<M> {
    /// Spawn the simulator thread. It ticks immediately, then every `interval`.
    pub fn start(mut self, interval: Duration) -> JoinHandle<()> {
        thread::spawn(move || {
            info!(
                "Price simulator started (Thread ID: {:?}), tick every {:?}",
                thread::current().id(),
                interval
            );
            loop {
                let now = self.clock.now();
                let stamp = now.format("%Y-%m-%d %H:%M");
                match self.tick(now.naive_local()) {
                    Ok(outcome) => {
                        if outcome.reset {
                            info!("[{stamp}] market reset, series reseeded at {SEED_PRICE}");
                        }
                        match outcome.state {
                            MarketState::Open { price } => {
                                info!("[{stamp}] updated price -> {price}")
                            }
                            MarketState::Closed => info!("[{stamp}] market closed, no update"),
                        }
                    }
                    Err(e) => error!("[{stamp}] tick failed: {e}"),
                }
                thread::sleep(interval);
            }
        })
    }
}
