use std::sync::Arc;

use axum::{routing::get, Router};

use visit_cell::router::visit_routes;
use visit_cell::services::VisitBookingService;

pub fn create_router(service: Arc<VisitBookingService>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic visits API is running!" }))
        .nest("/visits", visit_routes(service))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use shared_utils::{ClinicZone, FixedClock};
    use tower::ServiceExt;
    use visit_cell::services::InMemoryClinicStore;

    fn app() -> Router {
        let service = VisitBookingService::new(
            Arc::new(InMemoryClinicStore::new()),
            Arc::new(FixedClock::new(1_893_585_600)),
            ClinicZone::utc(),
        );
        create_router(Arc::new(service))
    }

    #[tokio::test]
    async fn liveness_route_answers() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn visits_are_nested() {
        let response = app()
            .oneshot(
                Request::get("/visits/00000000-0000-0000-0000-000000000000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
