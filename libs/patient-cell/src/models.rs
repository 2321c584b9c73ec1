use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::{AnimalType, VisitLookup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub animal_type: AnimalType,
}

impl Patient {
    pub fn new(name: &str, animal_type: AnimalType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            animal_type,
        }
    }

    /// True when any of the patient's booked visits covers `epoch`.
    pub fn has_visit_at(&self, visits: &dyn VisitLookup, epoch: i64) -> bool {
        visits
            .patient_visits(self.id)
            .iter()
            .any(|visit| visit.covers(epoch))
    }
}
