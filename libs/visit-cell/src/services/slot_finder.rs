// libs/visit-cell/src/services/slot_finder.rs
//
// Enumerates free one-hour slots for a roster of doctors.

use tracing::debug;

use doctor_cell::Doctor;
use shared_models::{VisitLookup, SECONDS_PER_HOUR, VISIT_DURATION_SECONDS};
use shared_utils::ClinicZone;

use crate::models::SlotSearchResult;
use crate::services::time_window::TimeWindow;

/// Ascending top-of-hour timestamps `t` with `start <= t <= end`.
pub fn top_hours_between(window: &TimeWindow) -> impl Iterator<Item = i64> {
    let start = window.start();
    let remainder = start.rem_euclid(SECONDS_PER_HOUR);
    let first = if remainder == 0 {
        start
    } else {
        start - remainder + SECONDS_PER_HOUR
    };

    (first..=window.end()).step_by(SECONDS_PER_HOUR as usize)
}

pub struct SlotFinder {
    zone: ClinicZone,
}

impl SlotFinder {
    pub fn new(zone: ClinicZone) -> Self {
        Self { zone }
    }

    /// Slot starts inside `window` where the doctor is available for the whole hour.
    ///
    /// Both the first and the last covered second of `[t, t + 3600)` must be
    /// available, so a slot never straddles the end of the working day or an
    /// existing visit.
    pub fn free_slots(&self, doctor: &Doctor, window: &TimeWindow, visits: &dyn VisitLookup) -> Vec<i64> {
        top_hours_between(window)
            .filter(|&t| {
                doctor.is_available_at(t, &self.zone, visits)
                    && doctor.is_available_at(t + VISIT_DURATION_SECONDS - 1, &self.zone, visits)
            })
            .collect()
    }

    /// Per-doctor free slots, in roster order; doctors without any free slot are left out.
    pub fn find(&self, doctors: Vec<Doctor>, window: &TimeWindow, visits: &dyn VisitLookup) -> Vec<SlotSearchResult> {
        let candidates = doctors.len();

        let results: Vec<SlotSearchResult> = doctors
            .into_iter()
            .filter_map(|doctor| {
                let slots = self.free_slots(&doctor, window, visits);
                if slots.is_empty() {
                    None
                } else {
                    Some(SlotSearchResult { doctor, slots })
                }
            })
            .collect();

        debug!(
            "{} of {} doctors have free slots between {} and {}",
            results.len(),
            candidates,
            window.start(),
            window.end()
        );

        results
    }
}
