//! Market calendar policy: open hours, the daily reset window and the clock
//! that reads wall-clock time in the reference zone.
//!
//! Everything here is a pure function of a time of day, so the simulator can be
//! driven with hand-built times in tests.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;
use ticker_common::TickerError;

/// Hour window during which prices move, `[open_hour, close_hour)`.
///
/// The window wraps past midnight when `close_hour <= open_hour`; the default
/// `17..1` covers 17:00 through 00:59.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MarketHours {
    /// Opening hour (inclusive), 0–23.
    pub open_hour: u32,
    /// Closing hour (exclusive), 0–23.
    pub close_hour: u32,
}

impl Default for MarketHours {
    fn default() -> Self {
        Self {
            open_hour: 17,
            close_hour: 1,
        }
    }
}

impl MarketHours {
    pub fn new(open_hour: u32, close_hour: u32) -> Result<Self, TickerError> {
        if open_hour > 23 || close_hour > 23 {
            return Err(TickerError::InvalidConfig(format!(
                "market hours must be within 0..=23, got {open_hour}..{close_hour}"
            )));
        }
        Ok(Self {
            open_hour,
            close_hour,
        })
    }

    pub fn is_open<T: Timelike>(&self, now: &T) -> bool {
        let hour = now.hour();
        if self.open_hour < self.close_hour {
            (self.open_hour..self.close_hour).contains(&hour)
        } else {
            hour >= self.open_hour || hour < self.close_hour
        }
    }
}

/// Daily window in which the series may be cleared, `hour:minute_start` up to
/// but excluding `hour:minute_end`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResetWindow {
    pub hour: u32,
    pub minute_start: u32,
    pub minute_end: u32,
}

impl Default for ResetWindow {
    fn default() -> Self {
        Self {
            hour: 17,
            minute_start: 0,
            minute_end: 5,
        }
    }
}

impl ResetWindow {
    pub fn contains<T: Timelike>(&self, now: &T) -> bool {
        now.hour() == self.hour && (self.minute_start..self.minute_end).contains(&now.minute())
    }
}

impl fmt::Display for ResetWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.hour, self.minute_start, self.hour, self.minute_end
        )
    }
}

/// Parses `"HH:MM-HH:MM"`. Both ends must share the hour; `HH:60` is accepted
/// as the end so a window can run to the top of the next hour.
impl FromStr for ResetWindow {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TickerError::InvalidConfig(format!("bad reset window: {s:?}"));
        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let (start_hour, minute_start) = parse_hh_mm(start).ok_or_else(invalid)?;
        let (end_hour, minute_end) = parse_hh_mm(end).ok_or_else(invalid)?;

        if start_hour != end_hour
            || start_hour > 23
            || minute_start >= minute_end
            || minute_end > 60
        {
            return Err(invalid());
        }
        Ok(Self {
            hour: start_hour,
            minute_start,
            minute_end,
        })
    }
}

fn parse_hh_mm(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.trim().split_once(':')?;
    Some((h.parse().ok()?, m.parse().ok()?))
}

/// Parse the reset setting; `"none"` (or an empty value) disables daily resets.
pub fn parse_reset_setting(s: &str) -> Result<Option<ResetWindow>, TickerError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Combined open-hours and reset policy.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MarketCalendar {
    pub hours: MarketHours,
    pub reset_window: Option<ResetWindow>,
}

impl MarketCalendar {
    pub fn new(hours: MarketHours, reset_window: Option<ResetWindow>) -> Self {
        Self {
            hours,
            reset_window,
        }
    }

    pub fn is_market_open<T: Timelike>(&self, now: &T) -> bool {
        self.hours.is_open(now)
    }

    /// True inside the reset window. The once-per-day guard lives with the caller.
    pub fn should_reset_market<T: Timelike>(&self, now: &T) -> bool {
        self.reset_window.is_some_and(|window| window.contains(now))
    }
}

/// Reads wall-clock time in the reference zone.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MarketClock {
    tz: Tz,
}

impl Default for MarketClock {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Asia::Seoul,
        }
    }
}

impl MarketClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build a clock from an IANA zone name such as `Asia/Seoul`.
    pub fn from_name(name: &str) -> Result<Self, TickerError> {
        name.trim()
            .parse::<Tz>()
            .map(Self::new)
            .map_err(|e| TickerError::InvalidConfig(format!("unknown time zone {name:?}: {e}")))
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// Minute-resolution `"HH:MM"` label used for series timestamps.
pub fn minute_label<T: Timelike>(now: &T) -> String {
    format!("{:02}:{:02}", now.hour(), now.minute())
}
