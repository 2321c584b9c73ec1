// libs/visit-cell/src/models.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use doctor_cell::Doctor;
use shared_database::SupabaseError;
use shared_models::AppError;

// ==============================================================================
// SEARCH AND BOOKING MODELS
// ==============================================================================

/// A doctor together with the one-hour slot starts that are free inside a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSearchResult {
    pub doctor: Doctor,
    pub slots: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSearchQuery {
    pub animal_type: String,
    pub specialty: String,
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVisitRequest {
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub start: i64,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeWindowError {
    #[error("window bounds must be 10-digit epoch seconds (start={start}, end={end})")]
    NotEpochSeconds { start: i64, end: i64 },

    #[error("window start {start} is not in the future (now={now})")]
    StartNotInFuture { start: i64, now: i64 },

    #[error("window start {start} must be before end {end}")]
    StartNotBeforeEnd { start: i64, end: i64 },
}

/// Which booking rule rejected a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotPossibleReason {
    NotInFuture,
    NotTopOfHour,
    DoctorBusy,
    DoctorNotWorking,
    DoctorEndsWorkBeforeVisitEnds,
    PatientBusy,
    AnimalTypeMismatch,
}

impl fmt::Display for NotPossibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotPossibleReason::NotInFuture => write!(f, "not in future"),
            NotPossibleReason::NotTopOfHour => write!(f, "not top of hour"),
            NotPossibleReason::DoctorBusy => write!(f, "doctor busy"),
            NotPossibleReason::DoctorNotWorking => write!(f, "doctor not working"),
            NotPossibleReason::DoctorEndsWorkBeforeVisitEnds => write!(f, "doctor ends work before visit ends"),
            NotPossibleReason::PatientBusy => write!(f, "patient busy"),
            NotPossibleReason::AnimalTypeMismatch => write!(f, "animal type mismatch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisitError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(#[from] TimeWindowError),

    #[error("Doctor {0} is not active")]
    DoctorNotActive(Uuid),

    #[error("Visit not possible: {0}")]
    NotPossible(NotPossibleReason),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl VisitError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        VisitError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl From<SupabaseError> for VisitError {
    fn from(err: SupabaseError) -> Self {
        VisitError::Storage(err.to_string())
    }
}

impl From<VisitError> for AppError {
    fn from(err: VisitError) -> Self {
        match err {
            VisitError::NotFound { .. } => AppError::NotFound(err.to_string()),
            VisitError::InvalidTimeWindow(_) => AppError::BadRequest(err.to_string()),
            VisitError::DoctorNotActive(_) | VisitError::NotPossible(_) => {
                AppError::Unprocessable(err.to_string())
            }
            VisitError::Storage(msg) => AppError::Database(msg),
        }
    }
}
