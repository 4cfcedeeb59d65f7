use crate::domain::ServedRecord;
use crate::transport::http::handlers::{health, home, records};
use crate::transport::http::types::{AppState, ErrorResponse, HealthResponse, HomeResponse};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        home::home_handler,
        health::healthcheck_handler,
        records::list_records_handler,
        records::get_record_handler
    ),
    components(schemas(ServedRecord, HomeResponse, ErrorResponse, HealthResponse))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home_handler))
        .route("/health", get(health::healthcheck_handler))
        .route("/records", get(records::list_records_handler))
        .route("/records/:id", get(records::get_record_handler))
        .with_state(app_state)
}
