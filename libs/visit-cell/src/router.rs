// libs/visit-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::services::booking::VisitBookingService;

pub fn visit_routes(service: Arc<VisitBookingService>) -> Router {
    Router::new()
        .route("/", post(handlers::create_visit))
        .route("/slots", get(handlers::find_free_slots))
        .route("/{visit_id}", get(handlers::get_visit))
        .with_state(service)
}
