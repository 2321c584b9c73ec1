// libs/visit-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use doctor_cell::Doctor;
use shared_models::{Visit, VISIT_DURATION_SECONDS};
use shared_utils::{ClinicZone, Clock};

use crate::models::{SlotSearchResult, VisitError};
use crate::services::consistency::SchedulingLocks;
use crate::services::reception::Reception;
use crate::services::repository::ClinicRepository;
use crate::services::slot_finder::SlotFinder;
use crate::services::time_window::TimeWindow;

pub struct VisitBookingService {
    repository: Arc<dyn ClinicRepository>,
    clock: Arc<dyn Clock>,
    reception: Reception,
    slot_finder: SlotFinder,
    locks: SchedulingLocks,
}

impl VisitBookingService {
    pub fn new(repository: Arc<dyn ClinicRepository>, clock: Arc<dyn Clock>, zone: ClinicZone) -> Self {
        Self {
            reception: Reception::new(Arc::clone(&clock), zone),
            slot_finder: SlotFinder::new(zone),
            locks: SchedulingLocks::new(),
            repository,
            clock,
        }
    }

    /// Free one-hour slots of active doctors treating `animal_type_name` with `specialty_name`.
    ///
    /// The result is a snapshot: a listed slot may be taken before it is booked,
    /// so `create_visit` validates again.
    #[instrument(skip(self))]
    pub async fn find_free_slots(
        &self,
        animal_type_name: &str,
        specialty_name: &str,
        window_start: i64,
        window_end: i64,
    ) -> Result<Vec<SlotSearchResult>, VisitError> {
        let window = TimeWindow::new(window_start, window_end, self.clock.as_ref())?;

        let animal_type = self
            .repository
            .find_animal_type_by_name(animal_type_name)
            .await?
            .ok_or_else(|| VisitError::not_found("Animal type", animal_type_name))?;

        let specialty = self
            .repository
            .find_specialty_by_name(specialty_name)
            .await?
            .ok_or_else(|| VisitError::not_found("Specialty", specialty_name))?;

        let doctors: Vec<Doctor> = self
            .repository
            .find_doctors_by_animal_type_and_specialty(&animal_type, &specialty)
            .await?
            .into_iter()
            .filter(|d| d.active)
            .collect();

        if doctors.is_empty() {
            debug!("No active {} doctors treating {}", specialty.name, animal_type.name);
            return Ok(Vec::new());
        }

        // The last slot may start at the window end and runs one hour past it.
        let doctor_ids: Vec<Uuid> = doctors.iter().map(|d| d.id).collect();
        let visits = self
            .repository
            .find_visits_involving(
                &doctor_ids,
                None,
                window.start(),
                window.end() + VISIT_DURATION_SECONDS,
            )
            .await?;

        Ok(self.slot_finder.find(doctors, &window, &visits))
    }

    /// Runs reception for the triple and persists the visit if every rule passes.
    #[instrument(skip(self))]
    pub async fn create_visit(
        &self,
        doctor_id: Uuid,
        patient_id: Uuid,
        start_epoch: i64,
    ) -> Result<Visit, VisitError> {
        let _guard = self.locks.lock_booking(doctor_id, patient_id).await;

        let doctor = self
            .repository
            .find_doctor_by_id(doctor_id)
            .await?
            .ok_or_else(|| VisitError::not_found("Doctor", doctor_id))?;

        let patient = self
            .repository
            .find_patient_by_id(patient_id)
            .await?
            .ok_or_else(|| VisitError::not_found("Patient", patient_id))?;

        let visits = self
            .repository
            .find_visits_involving(
                &[doctor_id],
                Some(patient_id),
                start_epoch,
                start_epoch + VISIT_DURATION_SECONDS,
            )
            .await?;

        let new_visit = self.reception.admit(&doctor, &patient, start_epoch, &visits)?;
        let visit = self.repository.persist_visit(new_visit).await?;

        info!(
            "Visit {} booked with doctor {} for patient {} at {}",
            visit.id,
            doctor_id,
            patient_id,
            visit.start_epoch_seconds
        );
        Ok(visit)
    }

    pub async fn get_visit(&self, visit_id: Uuid) -> Result<Visit, VisitError> {
        self.repository
            .find_visit_by_id(visit_id)
            .await?
            .ok_or_else(|| VisitError::not_found("Visit", visit_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use mockall::predicate::eq;

    use patient_cell::Patient;
    use shared_models::{AnimalType, MedSpecialty, VisitLedger};
    use shared_utils::test_utils::TestTime;

    use crate::models::NotPossibleReason;
    use crate::services::repository::MockClinicRepository;

    fn service(repository: MockClinicRepository, time: &TestTime) -> VisitBookingService {
        VisitBookingService::new(Arc::new(repository), time.clock.clone(), time.zone)
    }

    fn cat_doctor(cat: &AnimalType) -> Doctor {
        let mut doctor = Doctor::new("Ada", "Moss");
        doctor.animal_types.push(cat.clone());
        doctor
    }

    #[tokio::test]
    async fn rejected_visit_is_never_persisted() {
        let time = TestTime::default();
        let cat = AnimalType::new("Cat");
        let doctor = cat_doctor(&cat);
        let patient = Patient::new("Polly", AnimalType::new("Bird"));
        let (doctor_id, patient_id) = (doctor.id, patient.id);

        let mut repository = MockClinicRepository::new();
        repository
            .expect_find_doctor_by_id()
            .with(eq(doctor_id))
            .returning(move |_| Ok(Some(doctor.clone())));
        repository
            .expect_find_patient_by_id()
            .with(eq(patient_id))
            .returning(move |_| Ok(Some(patient.clone())));
        repository
            .expect_find_visits_involving()
            .returning(|_, _, _, _| Ok(VisitLedger::default()));
        repository.expect_persist_visit().never();

        let result = service(repository, &time)
            .create_visit(doctor_id, patient_id, time.next_monday_at(10, 0, 0))
            .await;

        assert_matches!(result, Err(VisitError::NotPossible(NotPossibleReason::AnimalTypeMismatch)));
    }

    #[tokio::test]
    async fn missing_doctor_stops_before_patient_lookup() {
        let time = TestTime::default();
        let mut repository = MockClinicRepository::new();
        repository.expect_find_doctor_by_id().returning(|_| Ok(None));
        repository.expect_find_patient_by_id().never();
        repository.expect_persist_visit().never();

        let result = service(repository, &time)
            .create_visit(Uuid::new_v4(), Uuid::new_v4(), time.next_monday_at(10, 0, 0))
            .await;

        assert_matches!(result, Err(VisitError::NotFound { entity: "Doctor", .. }));
    }

    #[tokio::test]
    async fn invalid_window_never_touches_storage() {
        let time = TestTime::default();
        let mut repository = MockClinicRepository::new();
        repository.expect_find_animal_type_by_name().never();

        let now = time.now();
        let result = service(repository, &time)
            .find_free_slots("Cat", "Surgery", now + 3600, now + 3600)
            .await;

        assert_matches!(result, Err(VisitError::InvalidTimeWindow(_)));
    }

    #[tokio::test]
    async fn inactive_doctors_are_left_out_of_slot_search() {
        let time = TestTime::default();
        let cat = AnimalType::new("Cat");
        let surgery = MedSpecialty::new("Surgery");
        let mut inactive = cat_doctor(&cat);
        inactive.active = false;
        inactive.specialties.push(surgery.clone());

        let mut repository = MockClinicRepository::new();
        let found_cat = cat.clone();
        repository
            .expect_find_animal_type_by_name()
            .returning(move |_| Ok(Some(found_cat.clone())));
        let found_surgery = surgery.clone();
        repository
            .expect_find_specialty_by_name()
            .returning(move |_| Ok(Some(found_surgery.clone())));
        repository
            .expect_find_doctors_by_animal_type_and_specialty()
            .returning(move |_, _| Ok(vec![inactive.clone()]));
        repository.expect_find_visits_involving().never();

        let monday = time.next_monday_at(9, 0, 0);
        let result = service(repository, &time)
            .find_free_slots("Cat", "Surgery", monday, monday + 8 * 3600)
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_surfaced() {
        let time = TestTime::default();
        let mut repository = MockClinicRepository::new();
        repository
            .expect_find_visit_by_id()
            .returning(|_| Err(VisitError::Storage("connection reset".to_string())));

        let result = service(repository, &time).get_visit(Uuid::new_v4()).await;

        assert_matches!(result, Err(VisitError::Storage(msg)) if msg == "connection reset");
    }
}
