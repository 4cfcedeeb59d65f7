use crate::transport::http::types::{AppState, ErrorResponse};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/records",
    responses(
        (status = 200, description = "Every generated record", body = [ServedRecord])
    )
)]
pub async fn list_records_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog.records().to_vec())
}

#[utoipa::path(
    get,
    path = "/records/{id}",
    params(
        ("id" = i64, Path, description = "Catalog id of the record")
    ),
    responses(
        (status = 200, description = "The record", body = ServedRecord),
        (status = 404, description = "No record with that id", body = ErrorResponse)
    )
)]
pub async fn get_record_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    // A non-integer id cannot match any record.
    let found = id.ok().and_then(|Path(id)| state.catalog.get(id).cloned());
    match found {
        Some(record) => Json(record).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Record not found".to_string(),
            }),
        )
            .into_response(),
    }
}
