// src/bin/records_api.rs

use axum::http::Request;
use record_pipeline::infra::{config, logging};
use record_pipeline::transport::http::{create_router, ApiDoc, AppState, Catalog};
use record_pipeline::{RecordGenerator, Vocabulary};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init("info");

    // --- Catalog Initialization ---
    let count = config::generated_record_count()?;
    let catalog = Catalog::from_candidates(
        RecordGenerator::new(Vocabulary::books(), count).generate(count),
    );
    if let Some(sample) = catalog.records().first() {
        tracing::info!(records = catalog.len(), ?sample, "generated record catalog");
    }

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = create_router(AppState::new(catalog))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(cors);

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "records API listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
            }
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
