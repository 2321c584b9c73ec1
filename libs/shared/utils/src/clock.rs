use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};
use tracing::warn;

/// Source of "now" for every time-dependent rule.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn new(now_epoch_seconds: i64) -> Self {
        Self {
            now: AtomicI64::new(now_epoch_seconds),
        }
    }

    pub fn set(&self, now_epoch_seconds: i64) {
        self.now.store(now_epoch_seconds, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// The wall-clock zone a clinic's working hours are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClinicZone {
    /// Host zone, DST-aware.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl ClinicZone {
    pub fn utc() -> Self {
        ClinicZone::Fixed(Utc.fix())
    }

    /// Falls back to the host zone when the offset is absent or out of range.
    pub fn from_offset_seconds(offset: Option<i32>) -> Self {
        match offset {
            None => ClinicZone::Local,
            Some(seconds) => match FixedOffset::east_opt(seconds) {
                Some(offset) => ClinicZone::Fixed(offset),
                None => {
                    warn!("UTC offset of {} seconds is out of range, using host local zone", seconds);
                    ClinicZone::Local
                }
            },
        }
    }

    /// Wall-clock date and time at `epoch`, or `None` when chrono cannot represent it.
    pub fn local_datetime(&self, epoch: i64) -> Option<NaiveDateTime> {
        match self {
            ClinicZone::Local => Local
                .timestamp_opt(epoch, 0)
                .single()
                .map(|dt| dt.naive_local()),
            ClinicZone::Fixed(offset) => offset
                .timestamp_opt(epoch, 0)
                .single()
                .map(|dt| dt.naive_local()),
        }
    }
}
