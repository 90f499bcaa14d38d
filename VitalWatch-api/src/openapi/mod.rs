use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Reading endpoints
        crate::api::handlers::readings::record_reading,
        crate::api::handlers::readings::list_readings,

        // Report endpoints
        crate::api::handlers::reports::generate_report
    ),
    components(
        schemas(
            // Entities
            crate::entities::common::ErrorResponse,
            crate::entities::reading::HealthReading,
            crate::entities::reading::CreateReadingRequest,
            crate::entities::reading::ReadingListResponse,
            crate::entities::report::PublicHealthReport,
            crate::entities::report::PublicTimeRange,
            crate::entities::report::PublicAverages,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Reading handlers
            crate::api::handlers::readings::ListQueryParams
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "readings", description = "Vitals recording endpoints"),
        (name = "reports", description = "Health report generation")
    ),
    info(
        title = "VitalWatch API",
        version = "0.1.0",
        description = "Health reports for remotely monitored patients",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
