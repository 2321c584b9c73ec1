use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use shared_config::{AppConfig, StoreBackend};
use shared_utils::{ClinicZone, SystemClock};
use visit_cell::services::{
    ClinicRepository, InMemoryClinicStore, SupabaseClinicStore, VisitBookingService,
};

async fn build_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn ClinicRepository>> {
    match config.store_backend() {
        StoreBackend::Supabase => {
            info!("Using Supabase clinic store at {}", config.supabase_url);
            Ok(Arc::new(SupabaseClinicStore::new(config)))
        }
        StoreBackend::InMemory => match &config.seed_path {
            Some(path) => {
                info!("Using in-memory clinic store seeded from {}", path);
                let store = InMemoryClinicStore::load_seed_file(path)
                    .await
                    .with_context(|| format!("loading clinic seed {}", path))?;
                Ok(Arc::new(store))
            }
            None => {
                info!("Using empty in-memory clinic store");
                Ok(Arc::new(InMemoryClinicStore::new()))
            }
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clinic visits API server");

    let config = AppConfig::from_env();

    let repository = build_repository(&config).await?;
    let zone = ClinicZone::from_offset_seconds(config.clinic_utc_offset_seconds);
    let service = Arc::new(VisitBookingService::new(
        repository,
        Arc::new(SystemClock),
        zone,
    ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router::create_router(service)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
