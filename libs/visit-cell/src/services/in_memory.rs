// libs/visit-cell/src/services/in_memory.rs
use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::{Doctor, DoctorError};
use patient_cell::Patient;
use shared_models::{AnimalType, MedSpecialty, NewVisit, Visit, VisitLedger};

use crate::models::{NotPossibleReason, VisitError};
use crate::services::repository::ClinicRepository;

/// Initial contents for an in-memory clinic, usually read from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicSeed {
    #[serde(default)]
    pub animal_types: Vec<AnimalType>,
    #[serde(default)]
    pub specialties: Vec<MedSpecialty>,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seed file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Doctor {doctor_id} is invalid: {source}")]
    InvalidDoctor {
        doctor_id: Uuid,
        #[source]
        source: DoctorError,
    },

    #[error("Seeded {owner} visits {first} and {second} overlap")]
    OverlappingVisits {
        owner: &'static str,
        first: Uuid,
        second: Uuid,
    },
}

#[derive(Debug, Default)]
struct ClinicData {
    animal_types: Vec<AnimalType>,
    specialties: Vec<MedSpecialty>,
    // Roster order is the order doctors were added.
    doctors: Vec<Doctor>,
    patients: HashMap<Uuid, Patient>,
    visits: Vec<Visit>,
}

/// Process-local clinic storage.
#[derive(Debug, Default)]
pub struct InMemoryClinicStore {
    data: RwLock<ClinicData>,
}

impl InMemoryClinicStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: ClinicSeed) -> Result<Self, SeedError> {
        for doctor in &seed.doctors {
            doctor.validate().map_err(|source| SeedError::InvalidDoctor {
                doctor_id: doctor.id,
                source,
            })?;
        }

        if let Some((first, second)) = first_overlap(&seed.visits, |v| v.doctor_id) {
            return Err(SeedError::OverlappingVisits { owner: "doctor", first, second });
        }
        if let Some((first, second)) = first_overlap(&seed.visits, |v| v.patient_id) {
            return Err(SeedError::OverlappingVisits { owner: "patient", first, second });
        }

        info!(
            "Seeding clinic with {} doctors, {} patients and {} visits",
            seed.doctors.len(),
            seed.patients.len(),
            seed.visits.len()
        );

        let data = ClinicData {
            animal_types: seed.animal_types,
            specialties: seed.specialties,
            doctors: seed.doctors,
            patients: seed.patients.into_iter().map(|p| (p.id, p)).collect(),
            visits: seed.visits,
        };

        Ok(Self {
            data: RwLock::new(data),
        })
    }

    pub async fn load_seed_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        debug!("Loading clinic seed from {}", path.display());

        let raw = tokio::fs::read_to_string(path).await?;
        let seed: ClinicSeed = serde_json::from_str(&raw)?;
        Self::from_seed(seed)
    }

    pub async fn add_animal_type(&self, animal_type: AnimalType) {
        self.data.write().await.animal_types.push(animal_type);
    }

    pub async fn add_specialty(&self, specialty: MedSpecialty) {
        self.data.write().await.specialties.push(specialty);
    }

    pub async fn add_doctor(&self, doctor: Doctor) -> Result<(), DoctorError> {
        doctor.validate()?;
        self.data.write().await.doctors.push(doctor);
        Ok(())
    }

    pub async fn add_patient(&self, patient: Patient) {
        self.data.write().await.patients.insert(patient.id, patient);
    }

    pub async fn visit_count(&self) -> usize {
        self.data.read().await.visits.len()
    }
}

/// Ids of two visits of the same owner that overlap, if any.
fn first_overlap(visits: &[Visit], owner: impl Fn(&Visit) -> Uuid) -> Option<(Uuid, Uuid)> {
    let mut by_owner: HashMap<Uuid, Vec<&Visit>> = HashMap::new();
    for visit in visits {
        by_owner.entry(owner(visit)).or_default().push(visit);
    }

    // Sorted by start, any overlap shows up between neighbours.
    for owned in by_owner.values_mut() {
        owned.sort_by_key(|v| v.start_epoch_seconds);
        if let Some(pair) = owned
            .windows(2)
            .find(|pair| pair[1].start_epoch_seconds < pair[0].end_epoch_seconds())
        {
            return Some((pair[0].id, pair[1].id));
        }
    }
    None
}

#[async_trait]
impl ClinicRepository for InMemoryClinicStore {
    async fn find_doctor_by_id(&self, id: Uuid) -> Result<Option<Doctor>, VisitError> {
        let data = self.data.read().await;
        Ok(data.doctors.iter().find(|d| d.id == id).cloned())
    }

    async fn find_patient_by_id(&self, id: Uuid) -> Result<Option<Patient>, VisitError> {
        Ok(self.data.read().await.patients.get(&id).cloned())
    }

    async fn find_animal_type_by_name(&self, name: &str) -> Result<Option<AnimalType>, VisitError> {
        let data = self.data.read().await;
        Ok(data.animal_types.iter().find(|a| a.name == name).cloned())
    }

    async fn find_specialty_by_name(&self, name: &str) -> Result<Option<MedSpecialty>, VisitError> {
        let data = self.data.read().await;
        Ok(data.specialties.iter().find(|s| s.name == name).cloned())
    }

    async fn find_doctors_by_animal_type_and_specialty(
        &self,
        animal_type: &AnimalType,
        specialty: &MedSpecialty,
    ) -> Result<Vec<Doctor>, VisitError> {
        let data = self.data.read().await;
        Ok(data
            .doctors
            .iter()
            .filter(|d| d.treats(animal_type) && d.has_specialty(specialty))
            .cloned()
            .collect())
    }

    async fn find_visits_involving(
        &self,
        doctor_ids: &[Uuid],
        patient_id: Option<Uuid>,
        from: i64,
        to: i64,
    ) -> Result<VisitLedger, VisitError> {
        let data = self.data.read().await;
        let visits = data
            .visits
            .iter()
            .filter(|v| v.overlaps(from, to))
            .filter(|v| doctor_ids.contains(&v.doctor_id) || Some(v.patient_id) == patient_id)
            .cloned()
            .collect();
        Ok(VisitLedger::new(visits))
    }

    async fn persist_visit(&self, visit: NewVisit) -> Result<Visit, VisitError> {
        let mut data = self.data.write().await;
        let (start, end) = (visit.start_epoch_seconds, visit.end_epoch_seconds());

        if data
            .visits
            .iter()
            .any(|v| v.doctor_id == visit.doctor_id && v.overlaps(start, end))
        {
            warn!("Refusing overlapping visit for doctor {} at {}", visit.doctor_id, start);
            return Err(VisitError::NotPossible(NotPossibleReason::DoctorBusy));
        }

        if data
            .visits
            .iter()
            .any(|v| v.patient_id == visit.patient_id && v.overlaps(start, end))
        {
            warn!("Refusing overlapping visit for patient {} at {}", visit.patient_id, start);
            return Err(VisitError::NotPossible(NotPossibleReason::PatientBusy));
        }

        let visit = visit.into_visit(Uuid::new_v4());
        data.visits.push(visit.clone());
        Ok(visit)
    }

    async fn find_visit_by_id(&self, id: Uuid) -> Result<Option<Visit>, VisitError> {
        let data = self.data.read().await;
        Ok(data.visits.iter().find(|v| v.id == id).cloned())
    }
}
