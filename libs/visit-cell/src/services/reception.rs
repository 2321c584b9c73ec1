// libs/visit-cell/src/services/reception.rs
//
// Ordered precondition chain for a new visit. The first failing rule wins.

use std::sync::Arc;

use tracing::debug;

use doctor_cell::Doctor;
use patient_cell::Patient;
use shared_models::{NewVisit, VisitLookup, SECONDS_PER_HOUR, VISIT_DURATION_SECONDS};
use shared_utils::{ClinicZone, Clock};

use crate::models::{NotPossibleReason, VisitError};

pub struct Reception {
    clock: Arc<dyn Clock>,
    zone: ClinicZone,
}

impl Reception {
    pub fn new(clock: Arc<dyn Clock>, zone: ClinicZone) -> Self {
        Self { clock, zone }
    }

    /// Decides whether `patient` may see `doctor` at `start_epoch`.
    ///
    /// The doctor and patient must already be resolved; `visits` must hold every
    /// booked visit of both. Nothing is mutated: on success the caller gets an
    /// unsaved one-hour visit to persist.
    pub fn admit(
        &self,
        doctor: &Doctor,
        patient: &Patient,
        start_epoch: i64,
        visits: &dyn VisitLookup,
    ) -> Result<NewVisit, VisitError> {
        let now = self.clock.now_epoch_seconds();
        if start_epoch <= now {
            return Err(reject(NotPossibleReason::NotInFuture, doctor, start_epoch));
        }

        if start_epoch.rem_euclid(SECONDS_PER_HOUR) != 0 {
            return Err(reject(NotPossibleReason::NotTopOfHour, doctor, start_epoch));
        }

        if !doctor.active {
            debug!("Doctor {} is not active", doctor.id);
            return Err(VisitError::DoctorNotActive(doctor.id));
        }

        if doctor.has_visit_at(visits, start_epoch) {
            return Err(reject(NotPossibleReason::DoctorBusy, doctor, start_epoch));
        }

        if !doctor.works_at(start_epoch, &self.zone) {
            return Err(reject(NotPossibleReason::DoctorNotWorking, doctor, start_epoch));
        }

        // Probes the first second after the visit, not the last second inside it.
        if !doctor.works_at(start_epoch + VISIT_DURATION_SECONDS, &self.zone) {
            return Err(reject(NotPossibleReason::DoctorEndsWorkBeforeVisitEnds, doctor, start_epoch));
        }

        if patient.has_visit_at(visits, start_epoch) {
            return Err(reject(NotPossibleReason::PatientBusy, doctor, start_epoch));
        }

        if !doctor.treats(&patient.animal_type) {
            return Err(reject(NotPossibleReason::AnimalTypeMismatch, doctor, start_epoch));
        }

        Ok(NewVisit::new(doctor.id, patient.id, start_epoch))
    }
}

fn reject(reason: NotPossibleReason, doctor: &Doctor, start_epoch: i64) -> VisitError {
    debug!("Visit with doctor {} at {} rejected: {}", doctor.id, start_epoch, reason);
    VisitError::NotPossible(reason)
}
