use axum::{
    extract::{rejection::JsonRejection, Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};

use vital_watch_domain::services::ReadingServiceError;

use crate::api::state::AppState;
use crate::entities::common::ErrorResponse;
use crate::entities::reading::{CreateReadingRequest, HealthReading, ReadingListResponse};

/// Query parameters for listing readings
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListQueryParams {
    /// Maximum number of results (default: 100, max: 1000)
    pub limit: Option<usize>,
}

fn map_service_error(err: ReadingServiceError) -> ErrorResponse {
    match err {
        ReadingServiceError::ValidationError(message) => {
            warn!("Invalid reading data: {}", message);
            ErrorResponse::validation_error(&message, None)
        }
        ReadingServiceError::Unsupported(message) => {
            warn!("Reading provider rejected the operation: {}", message);
            ErrorResponse::not_supported("The configured reading provider is read-only")
        }
        ReadingServiceError::RepositoryError(message) => {
            error!("Reading provider error: {}", message);
            ErrorResponse::internal_error()
        }
    }
}

/// Record a new vitals reading
#[utoipa::path(
    post,
    path = "/api/v1/readings",
    request_body = CreateReadingRequest,
    responses(
        (status = 201, description = "Reading recorded", body = HealthReading),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 405, description = "Reading provider is read-only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(state, payload))]
pub async fn record_reading(
    State(state): State<AppState>,
    payload: Result<Json<CreateReadingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Response> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected reading payload: {}", rejection.body_text());
        ErrorResponse::bad_request(&rejection.body_text()).into_response()
    })?;

    let reading = state
        .reading_service
        .record_reading(request.into())
        .await
        .map_err(|e| map_service_error(e).into_response())?;

    info!("Reading recorded with ID: {:?}", reading.id);
    Ok((StatusCode::CREATED, Json(HealthReading::from(reading))))
}

/// List recent readings, newest first
#[utoipa::path(
    get,
    path = "/api/v1/readings",
    params(ListQueryParams),
    responses(
        (status = 200, description = "Readings retrieved", body = ReadingListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(state))]
pub async fn list_readings(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> Result<impl IntoResponse, Response> {
    let readings = state
        .reading_service
        .list_readings(params.limit)
        .await
        .map_err(|e| map_service_error(e).into_response())?;

    let data: Vec<HealthReading> = readings.into_iter().map(HealthReading::from).collect();
    Ok((
        StatusCode::OK,
        Json(ReadingListResponse {
            count: data.len(),
            data,
        }),
    ))
}
