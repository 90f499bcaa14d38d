use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument};

use vital_watch_domain::services::ReportServiceError;

use crate::api::state::AppState;
use crate::entities::common::ErrorResponse;
use crate::entities::report::PublicHealthReport;

/// Message returned when the reading provider fails
pub const REPORT_FAILURE_MESSAGE: &str = "Failed to generate health report";

/// Generate a health report from the current readings
#[utoipa::path(
    post,
    path = "/api/v1/reports",
    responses(
        (status = 200, description = "Report generated", body = PublicHealthReport),
        (status = 404, description = "No readings available", body = ErrorResponse),
        (status = 502, description = "Reading provider unavailable", body = ErrorResponse),
    ),
    tag = "reports"
)]
#[instrument(skip(state))]
pub async fn generate_report(State(state): State<AppState>) -> Result<impl IntoResponse, Response> {
    match state.report_service.generate_report().await {
        Ok(report) => {
            info!("Health report generated over {} readings", report.data_points);
            Ok((StatusCode::OK, Json(PublicHealthReport::from(report))))
        }
        Err(ReportServiceError::InsufficientData(message)) => {
            info!("Insufficient data for report");
            Err(ErrorResponse::insufficient_data(&message).into_response())
        }
        Err(ReportServiceError::Fetch(message)) => {
            error!("Error generating health report: {}", message);
            Err(ErrorResponse::fetch_error(REPORT_FAILURE_MESSAGE).into_response())
        }
    }
}
