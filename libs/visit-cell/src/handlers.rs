// libs/visit-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared_models::{AppError, Visit};

use crate::models::{CreateVisitRequest, SlotSearchQuery, SlotSearchResult};
use crate::services::booking::VisitBookingService;

/// Free slots per doctor for an animal type, a specialty and a time window.
#[axum::debug_handler]
pub async fn find_free_slots(
    State(service): State<Arc<VisitBookingService>>,
    Query(query): Query<SlotSearchQuery>,
) -> Result<Json<Vec<SlotSearchResult>>, AppError> {
    let results = service
        .find_free_slots(&query.animal_type, &query.specialty, query.start, query.end)
        .await?;

    Ok(Json(results))
}

#[axum::debug_handler]
pub async fn create_visit(
    State(service): State<Arc<VisitBookingService>>,
    Json(request): Json<CreateVisitRequest>,
) -> Result<(StatusCode, Json<Visit>), AppError> {
    let visit = service
        .create_visit(request.doctor_id, request.patient_id, request.start)
        .await?;

    Ok((StatusCode::CREATED, Json(visit)))
}

#[axum::debug_handler]
pub async fn get_visit(
    State(service): State<Arc<VisitBookingService>>,
    Path(visit_id): Path<Uuid>,
) -> Result<Json<Visit>, AppError> {
    let visit = service.get_visit(visit_id).await?;
    Ok(Json(visit))
}
