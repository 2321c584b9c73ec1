use std::sync::Arc;

use chrono::Weekday;

use crate::clock::{ClinicZone, FixedClock};

/// 2030-01-02 12:00:00 UTC, a Wednesday.
pub const REFERENCE_NOW: i64 = 1_893_585_600;

pub struct TestTime {
    pub clock: Arc<FixedClock>,
    pub zone: ClinicZone,
}

impl Default for TestTime {
    fn default() -> Self {
        Self::at(REFERENCE_NOW)
    }
}

impl TestTime {
    pub fn at(now_epoch_seconds: i64) -> Self {
        Self {
            clock: Arc::new(FixedClock::new(now_epoch_seconds)),
            zone: ClinicZone::utc(),
        }
    }

    pub fn now(&self) -> i64 {
        use crate::clock::Clock;
        self.clock.now_epoch_seconds()
    }

    /// First Monday strictly after today's UTC date, at `hour:minute:second` UTC.
    pub fn next_monday_at(&self, hour: u32, minute: u32, second: u32) -> i64 {
        next_weekday_at(self.now(), Weekday::Mon, hour, minute, second)
    }
}

const SECONDS_PER_DAY: i64 = 86_400;

/// First `weekday` strictly after the UTC date of `now_epoch_seconds`, at the given UTC time.
pub fn next_weekday_at(now_epoch_seconds: i64, weekday: Weekday, hour: u32, minute: u32, second: u32) -> i64 {
    // Day 0 of the epoch, 1970-01-01, was a Thursday.
    let today = now_epoch_seconds.div_euclid(SECONDS_PER_DAY);
    let today_from_monday = (today + 3).rem_euclid(7);
    let ahead = (i64::from(weekday.num_days_from_monday()) - today_from_monday - 1).rem_euclid(7) + 1;

    (today + ahead) * SECONDS_PER_DAY + i64::from(hour) * 3600 + i64::from(minute) * 60 + i64::from(second)
}
