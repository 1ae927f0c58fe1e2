//! Sources of "seconds since local midnight".
//!
//! The encoder only needs a single `f64`. Where it comes from is abstracted
//! behind [`TimeSource`] so the sampler can run against the wall clock, a
//! frozen instant, or a shifted clock for demos and tests.

use chrono::{Local, NaiveTime, Timelike};

use crate::encoder::normalize_time_of_day;
use crate::error::ClockError;

/// Anything that can report the current time of day.
pub trait TimeSource: Send + Sync {
    /// Seconds since local midnight, fractional part included.
    fn seconds_since_midnight(&self) -> f64;
}

/// `hours*3600 + minutes*60 + seconds + fraction` for any chrono time value
pub fn seconds_since_midnight<T: Timelike>(time: &T) -> f64 {
    // Leap seconds report nanosecond >= 1e9; fold them into the last second
    let nanos = time.nanosecond().min(999_999_999);
    f64::from(time.hour()) * 3_600.0
        + f64::from(time.minute()) * 60.0
        + f64::from(time.second())
        + f64::from(nanos) / 1e9
}

/// Parse `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff` into seconds since midnight.
pub fn parse_clock_time(input: &str) -> Result<f64, ClockError> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map(|time| seconds_since_midnight(&time))
        .map_err(|_| ClockError::InvalidClockTime {
            input: input.to_string(),
        })
}

/// The operating system's local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn seconds_since_midnight(&self) -> f64 {
        seconds_since_midnight(&Local::now())
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTime(pub f64);

impl TimeSource for FixedTime {
    fn seconds_since_midnight(&self) -> f64 {
        self.0
    }
}

/// Wraps another source and shifts it by a constant, wrapping at midnight
#[derive(Debug, Clone)]
pub struct OffsetClock<S> {
    inner: S,
    offset_secs: f64,
}

impl<S: TimeSource> OffsetClock<S> {
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidInput`] if the offset is not finite.
    pub fn new(inner: S, offset_secs: f64) -> Result<Self, ClockError> {
        if !offset_secs.is_finite() {
            return Err(ClockError::InvalidInput { value: offset_secs });
        }
        Ok(Self { inner, offset_secs })
    }
}

impl<S: TimeSource> TimeSource for OffsetClock<S> {
    fn seconds_since_midnight(&self) -> f64 {
        let shifted = self.inner.seconds_since_midnight() + self.offset_secs;
        // Both terms are finite, so normalization cannot fail
        normalize_time_of_day(shifted).unwrap_or(0.0)
    }
}

impl<S: TimeSource + ?Sized> TimeSource for Box<S> {
    fn seconds_since_midnight(&self) -> f64 {
        (**self).seconds_since_midnight()
    }
}
