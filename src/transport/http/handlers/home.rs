use crate::transport::http::types::HomeResponse;
use axum::Json;
use std::collections::BTreeMap;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service metadata and available endpoints", body = HomeResponse)
    )
)]
pub async fn home_handler() -> Json<HomeResponse> {
    let endpoints = BTreeMap::from([
        ("/records".to_string(), "Get all records".to_string()),
        ("/records/<id>".to_string(), "Get a specific record by ID".to_string()),
        ("/health".to_string(), "Service health".to_string()),
    ]);
    Json(HomeResponse {
        message: "Welcome to the Records API".to_string(),
        endpoints,
    })
}
