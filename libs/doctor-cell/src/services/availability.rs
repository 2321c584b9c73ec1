// libs/doctor-cell/src/services/availability.rs
//
// Availability rules: whether an instant is bookable for a doctor.

use chrono::{Datelike, Timelike};
use tracing::trace;

use shared_models::VisitLookup;
use shared_utils::ClinicZone;

use crate::models::Doctor;

impl Doctor {
    /// True when `epoch` falls on a working day, inside the inclusive hour range,
    /// in the clinic's wall-clock zone.
    pub fn works_at(&self, epoch: i64, zone: &ClinicZone) -> bool {
        let Some(local) = zone.local_datetime(epoch) else {
            trace!("Epoch {} has no wall-clock time in {:?}", epoch, zone);
            return false;
        };

        let hour = local.hour();
        self.working_days.contains(&local.weekday())
            && hour >= self.work_start_hour
            && hour <= self.work_end_hour
    }

    /// True when any booked visit, confirmed or not, covers `epoch`.
    pub fn has_visit_at(&self, visits: &dyn VisitLookup, epoch: i64) -> bool {
        visits
            .doctor_visits(self.id)
            .iter()
            .any(|visit| visit.covers(epoch))
    }

    pub fn is_available_at(&self, epoch: i64, zone: &ClinicZone, visits: &dyn VisitLookup) -> bool {
        self.works_at(epoch, zone) && !self.has_visit_at(visits, epoch)
    }
}
