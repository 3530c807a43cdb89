use std::any::Any;
use std::sync::Arc;

use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::debug;

use health_checkup_domain::services::HealthRecordServiceTrait;

use crate::api::handlers::{health, health_records};
use crate::error::ApiError;
use crate::openapi::configure_swagger_routes;

/// Shared service handed to every handler
pub type AppState = Arc<dyn HealthRecordServiceTrait>;

/// Create the application router
pub fn create_app(service: AppState) -> Router {
    debug!("Creating application router");

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .route(
            "/health-records",
            get(health_records::list_health_records).post(health_records::create_health_record),
        )
        .route(
            "/health-records/:id",
            get(health_records::get_health_record)
                .put(health_records::update_health_record)
                .delete(health_records::delete_health_record),
        )
        .method_not_allowed_fallback(handle_method_not_allowed)
        .with_state(service);

    debug!("API routes configured");

    add_swagger_ui(app)
        .fallback(handle_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}

async fn handle_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

async fn handle_method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("Method {} not allowed for {}", method, uri.path()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Unexpected(format!("handler panicked: {}", detail)).into_response()
}
