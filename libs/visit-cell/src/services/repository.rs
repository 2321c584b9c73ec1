// libs/visit-cell/src/services/repository.rs
use async_trait::async_trait;
use uuid::Uuid;

use doctor_cell::Doctor;
use patient_cell::Patient;
use shared_models::{AnimalType, MedSpecialty, NewVisit, Visit, VisitLedger};

use crate::models::VisitError;

/// Storage collaborator for the booking engine.
///
/// `persist_visit` is the serialization point for bookings: an implementation
/// must refuse a visit that overlaps an existing visit of the same doctor or
/// patient, even when the caller validated against an older snapshot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClinicRepository: Send + Sync {
    async fn find_doctor_by_id(&self, id: Uuid) -> Result<Option<Doctor>, VisitError>;

    async fn find_patient_by_id(&self, id: Uuid) -> Result<Option<Patient>, VisitError>;

    async fn find_animal_type_by_name(&self, name: &str) -> Result<Option<AnimalType>, VisitError>;

    async fn find_specialty_by_name(&self, name: &str) -> Result<Option<MedSpecialty>, VisitError>;

    /// Doctors treating `animal_type` with `specialty`, active or not.
    async fn find_doctors_by_animal_type_and_specialty(
        &self,
        animal_type: &AnimalType,
        specialty: &MedSpecialty,
    ) -> Result<Vec<Doctor>, VisitError>;

    /// Visits of the given doctors, plus visits of the patient if one is given,
    /// that overlap `[from, to)`.
    async fn find_visits_involving(
        &self,
        doctor_ids: &[Uuid],
        patient_id: Option<Uuid>,
        from: i64,
        to: i64,
    ) -> Result<VisitLedger, VisitError>;

    /// Assigns an id and stores the visit.
    async fn persist_visit(&self, visit: NewVisit) -> Result<Visit, VisitError>;

    async fn find_visit_by_id(&self, id: Uuid) -> Result<Option<Visit>, VisitError>;
}
