//! Bounded price series and its synchronized store.
//!
//! `Series` is the plain data structure: two index-aligned sequences (labels and
//! prices) plus the current price. It is not synchronized. `SeriesStore` wraps it
//! in a single `Mutex` and is the handle shared between the simulator thread and
//! the HTTP handlers.
//!
//! Invariants held by every operation:
//! - `timestamps.len() == prices.len() <= capacity`
//! - `current_price == *prices.back()` whenever the series is non-empty

use log::warn;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use ticker_common::Result;

/// Maximum number of points kept in memory.
pub const MAX_POINTS: usize = 1000;
/// Price the series is seeded with at startup and on each daily reset.
pub const SEED_PRICE: i64 = 5000;

/// Owned copy of the series handed out to readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSnapshot {
    pub timestamps: Vec<String>,
    pub prices: Vec<i64>,
    pub current_price: i64,
}

/// Unsynchronized bounded series. Wrap it with `SeriesStore` to share it.
#[derive(Debug)]
pub struct Series {
    timestamps: VecDeque<String>,
    prices: VecDeque<i64>,
    current_price: i64,
    capacity: usize,
}

impl Series {
    /// Create a series holding a single seed point.
    pub fn seeded(price: i64, timestamp: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut series = Self {
            timestamps: VecDeque::with_capacity(capacity + 1),
            prices: VecDeque::with_capacity(capacity + 1),
            current_price: price,
            capacity,
        };
        series.append(price, timestamp);
        series
    }

    /// Push one point, evicting the oldest one once over capacity.
    pub fn append(&mut self, price: i64, timestamp: impl Into<String>) {
        self.prices.push_back(price);
        self.timestamps.push_back(timestamp.into());
        self.current_price = price;
        while self.prices.len() > self.capacity {
            self.prices.pop_front();
            self.timestamps.pop_front();
        }
    }

    /// Drop every point and start over from a single seed point.
    pub fn reset(&mut self, seed_price: i64, seed_timestamp: impl Into<String>) {
        self.prices.clear();
        self.timestamps.clear();
        self.append(seed_price, seed_timestamp);
    }

    pub fn snapshot(&self) -> SeriesSnapshot {
        SeriesSnapshot {
            timestamps: self.timestamps.iter().cloned().collect(),
            prices: self.prices.iter().copied().collect(),
            current_price: self.current_price,
        }
    }

    pub fn last_price(&self) -> i64 {
        self.current_price
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Thread-safe owner of the series. One lock guards every field.
#[derive(Debug)]
pub struct SeriesStore {
    inner: Mutex<Series>,
}

impl SeriesStore {
    pub fn new(series: Series) -> Self {
        Self {
            inner: Mutex::new(series),
        }
    }

    /// Store seeded with `SEED_PRICE` at `timestamp`, capped at `MAX_POINTS`.
    pub fn seeded(timestamp: impl Into<String>) -> Self {
        Self::new(Series::seeded(SEED_PRICE, timestamp, MAX_POINTS))
    }

    pub fn append(&self, price: i64, timestamp: impl Into<String>) -> Result<()> {
        self.inner.lock()?.append(price, timestamp);
        Ok(())
    }

    pub fn reset(&self, seed_price: i64, seed_timestamp: impl Into<String>) -> Result<()> {
        self.inner.lock()?.reset(seed_price, seed_timestamp);
        Ok(())
    }

    /// Run `f` against the series under a single lock acquisition.
    ///
    /// Readers observe either the state before `f` or the state after it, never
    /// anything in between.
    pub fn transaction<T>(&self, f: impl FnOnce(&mut Series) -> T) -> Result<T> {
        let mut series = self.inner.lock()?;
        Ok(f(&mut series))
    }

    /// Copy the series out. A poisoned lock still yields the last committed data.
    pub fn snapshot(&self) -> SeriesSnapshot {
        let series = self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Series lock poisoned, serving last committed snapshot");
            PoisonError::into_inner(poisoned)
        });
        series.snapshot()
    }
}
