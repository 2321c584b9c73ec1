use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SECONDS_PER_HOUR: i64 = 3600;

/// Every visit occupies exactly one hour.
pub const VISIT_DURATION_SECONDS: i64 = SECONDS_PER_HOUR;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimalType {
    pub id: Uuid,
    pub name: String,
}

impl AnimalType {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MedSpecialty {
    pub id: Uuid,
    pub name: String,
}

impl MedSpecialty {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }
}

/// A visit that passed reception but has no identity yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVisit {
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub start_epoch_seconds: i64,
    pub duration_seconds: i64,
    pub confirmed: bool,
}

impl NewVisit {
    pub fn new(doctor_id: Uuid, patient_id: Uuid, start_epoch_seconds: i64) -> Self {
        Self {
            doctor_id,
            patient_id,
            start_epoch_seconds,
            duration_seconds: VISIT_DURATION_SECONDS,
            confirmed: false,
        }
    }

    pub fn end_epoch_seconds(&self) -> i64 {
        self.start_epoch_seconds + self.duration_seconds
    }

    pub fn into_visit(self, id: Uuid) -> Visit {
        Visit {
            id,
            doctor_id: self.doctor_id,
            patient_id: self.patient_id,
            start_epoch_seconds: self.start_epoch_seconds,
            duration_seconds: self.duration_seconds,
            confirmed: self.confirmed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub start_epoch_seconds: i64,
    #[serde(default = "default_duration")]
    pub duration_seconds: i64,
    #[serde(default)]
    pub confirmed: bool,
}

fn default_duration() -> i64 {
    VISIT_DURATION_SECONDS
}

impl Visit {
    pub fn end_epoch_seconds(&self) -> i64 {
        self.start_epoch_seconds + self.duration_seconds
    }

    /// Half-open: `[start, start + duration)`.
    pub fn covers(&self, epoch: i64) -> bool {
        epoch >= self.start_epoch_seconds && epoch < self.end_epoch_seconds()
    }

    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        start < self.end_epoch_seconds() && end > self.start_epoch_seconds
    }
}

/// Answers which booked visits reference a doctor or a patient.
///
/// Doctors and patients do not own their visits; they resolve them through
/// this collaborator so that a visit is the only holder of the relation.
pub trait VisitLookup {
    fn doctor_visits(&self, doctor_id: Uuid) -> Vec<&Visit>;
    fn patient_visits(&self, patient_id: Uuid) -> Vec<&Visit>;
}

/// Snapshot of visits loaded for one decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitLedger {
    visits: Vec<Visit>,
    ids: HashSet<Uuid>,
}

impl VisitLedger {
    pub fn new(visits: Vec<Visit>) -> Self {
        let mut ledger = Self {
            visits: Vec::with_capacity(visits.len()),
            ids: HashSet::with_capacity(visits.len()),
        };
        ledger.extend(visits);
        ledger
    }

    /// Adds visits, skipping ids already present.
    pub fn extend(&mut self, visits: impl IntoIterator<Item = Visit>) {
        for visit in visits {
            if self.ids.insert(visit.id) {
                self.visits.push(visit);
            }
        }
    }

    pub fn push(&mut self, visit: Visit) {
        self.extend(std::iter::once(visit));
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Visit> {
        self.visits.iter()
    }
}

impl VisitLookup for VisitLedger {
    fn doctor_visits(&self, doctor_id: Uuid) -> Vec<&Visit> {
        self.visits.iter().filter(|v| v.doctor_id == doctor_id).collect()
    }

    fn patient_visits(&self, patient_id: Uuid) -> Vec<&Visit> {
        self.visits.iter().filter(|v| v.patient_id == patient_id).collect()
    }
}
