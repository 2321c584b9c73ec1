// libs/visit-cell/src/services/time_window.rs

use shared_utils::Clock;

use crate::models::TimeWindowError;

/// Smallest and largest values with exactly ten decimal digits.
///
/// This is a magnitude check only: a ten-digit millisecond value passes, and
/// second values before 2001-09-09 or after 2286-11-20 are rejected.
pub const MIN_EPOCH_SECONDS: i64 = 1_000_000_000;
pub const MAX_EPOCH_SECONDS: i64 = 9_999_999_999;

pub fn is_ten_digit_epoch(value: i64) -> bool {
    (MIN_EPOCH_SECONDS..=MAX_EPOCH_SECONDS).contains(&value)
}

/// A future, ordered epoch-second range used for slot searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: i64,
    end: i64,
}

impl TimeWindow {
    /// Checks magnitude, then futurity of `start`, then ordering.
    pub fn new(start: i64, end: i64, clock: &dyn Clock) -> Result<Self, TimeWindowError> {
        if !is_ten_digit_epoch(start) || !is_ten_digit_epoch(end) {
            return Err(TimeWindowError::NotEpochSeconds { start, end });
        }

        let now = clock.now_epoch_seconds();
        if start <= now {
            return Err(TimeWindowError::StartNotInFuture { start, now });
        }

        if start >= end {
            return Err(TimeWindowError::StartNotBeforeEnd { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }
}
