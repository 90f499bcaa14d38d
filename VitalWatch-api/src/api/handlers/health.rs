use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use vital_watch_domain::health::{
    ComponentStatus as DomainComponentStatus, SystemHealth, SystemStatus, ANALYSIS_SERVICE_COMPONENT,
    READING_PROVIDER_COMPONENT,
};

use crate::api::state::AppState;

/// Health check response model
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok", "degraded", or "error")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// Timestamp of when the response was generated
    pub timestamp: u64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Details about the components the service depends on
    pub components: ComponentStatus,
    /// Environment information
    pub environment: String,
}

/// Status of individual system components
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// Reading provider status
    pub reading_provider: ComponentHealthStatus,
    /// Analysis service status
    pub analysis_service: ComponentHealthStatus,
    /// Additional components (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<serde_json::Value>,
}

/// Health status for an individual component
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok", "degraded", or "error")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// Track the time when the server started using a thread-safe OnceCell
static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();
static INIT: Once = Once::new();

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// Initialize the server start time
pub fn initialize_server_start_time() {
    INIT.call_once(|| {
        let _ = SERVER_START_TIME.set(unix_now());
    });
}

/// Map domain component status to API status string
fn map_component_status(status: &DomainComponentStatus) -> String {
    match status {
        DomainComponentStatus::Healthy => "ok",
        DomainComponentStatus::Degraded => "degraded",
        DomainComponentStatus::Unhealthy => "error",
    }
    .to_string()
}

fn component(health: &SystemHealth, name: &str) -> ComponentHealthStatus {
    match health.components.get(name) {
        Some(c) => ComponentHealthStatus {
            status: map_component_status(&c.status),
            message: c.details.clone(),
        },
        None => ComponentHealthStatus {
            status: "error".to_string(),
            message: Some("Component not reported".to_string()),
        },
    }
}

/// Build the response body and status code for a health snapshot
///
/// A degraded system still serves reports through the rule-based assessment,
/// so only an unhealthy one returns 503.
pub fn health_response(health: &SystemHealth, environment: &str) -> (StatusCode, HealthResponse) {
    let now = unix_now();
    let uptime = SERVER_START_TIME.get().map(|&start_time| now.saturating_sub(start_time));

    let (status_code, overall_status) = match health.status {
        SystemStatus::Healthy => (StatusCode::OK, "ok"),
        SystemStatus::Degraded => (StatusCode::OK, "degraded"),
        SystemStatus::Unhealthy => (StatusCode::SERVICE_UNAVAILABLE, "error"),
    };

    let additional: serde_json::Map<String, serde_json::Value> = health
        .components
        .iter()
        .filter(|(name, _)| *name != READING_PROVIDER_COMPONENT && *name != ANALYSIS_SERVICE_COMPONENT)
        .map(|(name, component)| {
            (
                name.clone(),
                serde_json::json!({
                    "status": map_component_status(&component.status),
                    "message": component.details,
                }),
            )
        })
        .collect();

    let response = HealthResponse {
        status: overall_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        components: ComponentStatus {
            reading_provider: component(health, READING_PROVIDER_COMPONENT),
            analysis_service: component(health, ANALYSIS_SERVICE_COMPONENT),
            additional: (!additional.is_empty()).then(|| additional.into()),
        },
        environment: environment.to_string(),
    };

    (status_code, response)
}

/// Health check endpoint to verify the API is running
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy or degraded", body = HealthResponse),
        (status = 503, description = "A required component is unavailable", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    info!("Health check requested");

    let system_health = state.health_service.get_system_health().await;
    let (status, response) = health_response(&system_health, &state.environment);
    (status, Json(response))
}
