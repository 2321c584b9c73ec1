// Shared fixtures for visit-cell integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use doctor_cell::Doctor;
use patient_cell::Patient;
use shared_models::{AnimalType, MedSpecialty};
use shared_utils::test_utils::TestTime;
use visit_cell::services::{InMemoryClinicStore, VisitBookingService};

pub const HOUR: i64 = 3600;

/// A small clinic: one cat surgeon, one bird patient and one cat patient.
pub struct TestClinic {
    pub time: TestTime,
    pub store: Arc<InMemoryClinicStore>,
    pub service: Arc<VisitBookingService>,
    pub cat: AnimalType,
    pub bird: AnimalType,
    pub surgery: MedSpecialty,
    pub doctor: Doctor,
    pub cat_patient: Patient,
    pub bird_patient: Patient,
}

impl TestClinic {
    pub async fn new() -> Self {
        let time = TestTime::default();
        let store = Arc::new(InMemoryClinicStore::new());

        let cat = AnimalType::new("Cat");
        let bird = AnimalType::new("Bird");
        let surgery = MedSpecialty::new("Surgery");
        store.add_animal_type(cat.clone()).await;
        store.add_animal_type(bird.clone()).await;
        store.add_specialty(surgery.clone()).await;

        let doctor = cat_surgeon("Ada", "Moss", &cat, &surgery);
        store.add_doctor(doctor.clone()).await.unwrap();

        let cat_patient = Patient::new("Tom", cat.clone());
        let bird_patient = Patient::new("Polly", bird.clone());
        store.add_patient(cat_patient.clone()).await;
        store.add_patient(bird_patient.clone()).await;

        let service = Arc::new(VisitBookingService::new(
            store.clone(),
            time.clock.clone(),
            time.zone,
        ));

        Self {
            time,
            store,
            service,
            cat,
            bird,
            surgery,
            doctor,
            cat_patient,
            bird_patient,
        }
    }

    pub async fn add_doctor(&self, doctor: Doctor) -> Doctor {
        self.store.add_doctor(doctor.clone()).await.unwrap();
        doctor
    }

    pub async fn add_cat_patient(&self, name: &str) -> Patient {
        let patient = Patient::new(name, self.cat.clone());
        self.store.add_patient(patient.clone()).await;
        patient
    }

    pub fn monday_at(&self, hour: u32) -> i64 {
        self.time.next_monday_at(hour, 0, 0)
    }
}

pub fn cat_surgeon(first_name: &str, last_name: &str, cat: &AnimalType, surgery: &MedSpecialty) -> Doctor {
    let mut doctor = Doctor::new(first_name, last_name);
    doctor.animal_types.push(cat.clone());
    doctor.specialties.push(surgery.clone());
    doctor
}
