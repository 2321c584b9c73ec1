// libs/visit-cell/src/services/supabase_store.rs
//
// ClinicRepository over PostgREST. Expects a unique constraint on
// visits(doctor_id, start_epoch_seconds).

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use doctor_cell::Doctor;
use patient_cell::Patient;
use shared_config::AppConfig;
use shared_database::{SupabaseClient, SupabaseError};
use shared_models::{AnimalType, MedSpecialty, NewVisit, Visit, VisitLedger, VISIT_DURATION_SECONDS};

use crate::models::{NotPossibleReason, VisitError};
use crate::services::repository::ClinicRepository;

pub struct SupabaseClinicStore {
    supabase: SupabaseClient,
}

impl SupabaseClinicStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub fn with_client(supabase: SupabaseClient) -> Self {
        Self { supabase }
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, VisitError> {
        let rows: Vec<T> = self.supabase.request(Method::GET, path, None).await?;
        Ok(rows)
    }

    async fn fetch_first<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, VisitError> {
        let rows = self.fetch_rows(path).await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl ClinicRepository for SupabaseClinicStore {
    async fn find_doctor_by_id(&self, id: Uuid) -> Result<Option<Doctor>, VisitError> {
        self.fetch_first(&format!("/rest/v1/doctors?id=eq.{}", id)).await
    }

    async fn find_patient_by_id(&self, id: Uuid) -> Result<Option<Patient>, VisitError> {
        self.fetch_first(&format!("/rest/v1/patients?id=eq.{}", id)).await
    }

    async fn find_animal_type_by_name(&self, name: &str) -> Result<Option<AnimalType>, VisitError> {
        let path = format!("/rest/v1/animal_types?name=eq.{}", urlencoding::encode(name));
        self.fetch_first(&path).await
    }

    async fn find_specialty_by_name(&self, name: &str) -> Result<Option<MedSpecialty>, VisitError> {
        let path = format!("/rest/v1/med_specialties?name=eq.{}", urlencoding::encode(name));
        self.fetch_first(&path).await
    }

    async fn find_doctors_by_animal_type_and_specialty(
        &self,
        animal_type: &AnimalType,
        specialty: &MedSpecialty,
    ) -> Result<Vec<Doctor>, VisitError> {
        let animal_filter = json!([{ "id": animal_type.id }]).to_string();
        let specialty_filter = json!([{ "id": specialty.id }]).to_string();
        let path = format!(
            "/rest/v1/doctors?animal_types=cs.{}&specialties=cs.{}&order=last_name.asc",
            urlencoding::encode(&animal_filter),
            urlencoding::encode(&specialty_filter)
        );

        let doctors: Vec<Doctor> = self.fetch_rows(&path).await?;
        let fetched = doctors.len();

        // The containment filter is advisory; the roster is what the entities say.
        let doctors: Vec<Doctor> = doctors
            .into_iter()
            .filter(|d| d.treats(animal_type) && d.has_specialty(specialty))
            .collect();

        debug!(
            "Matched {} of {} fetched doctors for {} / {}",
            doctors.len(),
            fetched,
            animal_type.name,
            specialty.name
        );
        Ok(doctors)
    }

    async fn find_visits_involving(
        &self,
        doctor_ids: &[Uuid],
        patient_id: Option<Uuid>,
        from: i64,
        to: i64,
    ) -> Result<VisitLedger, VisitError> {
        let mut clauses = Vec::new();
        if !doctor_ids.is_empty() {
            let ids: Vec<String> = doctor_ids.iter().map(Uuid::to_string).collect();
            clauses.push(format!("doctor_id.in.({})", ids.join(",")));
        }
        if let Some(patient_id) = patient_id {
            clauses.push(format!("patient_id.eq.{}", patient_id));
        }

        if clauses.is_empty() {
            return Ok(VisitLedger::default());
        }

        // Visits last one hour, so an overlapping visit starts in (from - 1h, to).
        let path = format!(
            "/rest/v1/visits?or=({})&start_epoch_seconds=gt.{}&start_epoch_seconds=lt.{}&order=start_epoch_seconds.asc",
            clauses.join(","),
            from - VISIT_DURATION_SECONDS,
            to
        );
        let visits: Vec<Visit> = self.fetch_rows(&path).await?;
        Ok(VisitLedger::new(visits))
    }

    async fn persist_visit(&self, visit: NewVisit) -> Result<Visit, VisitError> {
        let body = json!({
            "doctor_id": visit.doctor_id,
            "patient_id": visit.patient_id,
            "start_epoch_seconds": visit.start_epoch_seconds,
            "duration_seconds": visit.duration_seconds,
            "confirmed": visit.confirmed,
        });

        let rows: Vec<Visit> = match self.supabase.insert("/rest/v1/visits", body).await {
            Ok(rows) => rows,
            Err(SupabaseError::Conflict(detail)) => {
                warn!(
                    "Visit insert for doctor {} at {} hit the uniqueness constraint: {}",
                    visit.doctor_id,
                    visit.start_epoch_seconds,
                    detail
                );
                return Err(VisitError::NotPossible(NotPossibleReason::DoctorBusy));
            }
            Err(e) => return Err(e.into()),
        };

        rows.into_iter()
            .next()
            .ok_or_else(|| VisitError::Storage("Visit insert returned no rows".to_string()))
    }

    async fn find_visit_by_id(&self, id: Uuid) -> Result<Option<Visit>, VisitError> {
        self.fetch_first(&format!("/rest/v1/visits?id=eq.{}", id)).await
    }
}
