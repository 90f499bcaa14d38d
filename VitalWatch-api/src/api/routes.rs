use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::handlers::{health, readings, reports};
use crate::api::state::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route("/readings", get(readings::list_readings).post(readings::record_reading))
        .route("/reports", post(reports::generate_report));

    debug!("API routes configured");

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .with_state(state);

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);
    debug!("Swagger UI merged");

    let app = configure_http_layers(app);

    health::initialize_server_start_time();
    debug!("Health check service initialized");

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}

/// Apply request tracing, CORS and response security headers
pub fn configure_http_layers(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600));

    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    app.layer(cors)
        .layer(security_headers)
        .layer(TraceLayer::new_for_http())
}
