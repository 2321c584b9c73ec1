use std::collections::HashSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::{AnimalType, MedSpecialty};

pub const DEFAULT_WORK_START_HOUR: u32 = 9;
pub const DEFAULT_WORK_END_HOUR: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default = "default_working_days")]
    pub working_days: HashSet<Weekday>,
    /// First working hour of the day, inclusive.
    #[serde(default = "default_work_start_hour")]
    pub work_start_hour: u32,
    /// Last working hour of the day, inclusive: a doctor ending at 16 still works at 16:59:59.
    #[serde(default = "default_work_end_hour")]
    pub work_end_hour: u32,
    #[serde(default)]
    pub animal_types: Vec<AnimalType>,
    #[serde(default)]
    pub specialties: Vec<MedSpecialty>,
}

fn default_active() -> bool {
    true
}

pub fn default_working_days() -> HashSet<Weekday> {
    [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
        .into_iter()
        .collect()
}

fn default_work_start_hour() -> u32 {
    DEFAULT_WORK_START_HOUR
}

fn default_work_end_hour() -> u32 {
    DEFAULT_WORK_END_HOUR
}

impl Doctor {
    /// Active doctor working the default Mon-Fri, 9-16 schedule.
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            active: true,
            working_days: default_working_days(),
            work_start_hour: DEFAULT_WORK_START_HOUR,
            work_end_hour: DEFAULT_WORK_END_HOUR,
            animal_types: Vec::new(),
            specialties: Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn validate(&self) -> Result<(), DoctorError> {
        if self.work_start_hour > 23 || self.work_end_hour > 23 {
            return Err(DoctorError::InvalidWorkingHours {
                start: self.work_start_hour,
                end: self.work_end_hour,
            });
        }
        if self.work_start_hour > self.work_end_hour {
            return Err(DoctorError::InvalidWorkingHours {
                start: self.work_start_hour,
                end: self.work_end_hour,
            });
        }
        Ok(())
    }

    pub fn treats(&self, animal_type: &AnimalType) -> bool {
        self.animal_types.iter().any(|a| a.id == animal_type.id)
    }

    pub fn has_specialty(&self, specialty: &MedSpecialty) -> bool {
        self.specialties.iter().any(|s| s.id == specialty.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DoctorError {
    #[error("Working hours {start}-{end} are invalid: hours must be 0-23 and start must not exceed end")]
    InvalidWorkingHours { start: u32, end: u32 },
}
