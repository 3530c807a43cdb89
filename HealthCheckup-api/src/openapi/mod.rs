use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Probes
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::metrics,

        // Health record endpoints
        crate::api::handlers::health_records::list_health_records,
        crate::api::handlers::health_records::get_health_record,
        crate::api::handlers::health_records::create_health_record,
        crate::api::handlers::health_records::update_health_record,
        crate::api::handlers::health_records::delete_health_record
    ),
    components(
        schemas(
            crate::entities::health_record::HealthRecordRequest,
            crate::entities::health_record::HealthRecordResponse,
            crate::entities::common::ErrorResponse,
            crate::entities::common::DeletedRecord,
            crate::entities::common::HealthStatus,
            crate::entities::common::MetricsStatus,
            crate::entities::common::DependencyStatus,

            // Envelopes
            crate::entities::common::HealthRecordEnvelope,
            crate::entities::common::HealthRecordListEnvelope,
            crate::entities::common::DeletedRecordEnvelope,
            crate::entities::common::HealthStatusEnvelope,
            crate::entities::common::MetricsEnvelope
        )
    ),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "health_records", description = "Health checkup record management")
    ),
    info(
        title = "HealthCheckup API",
        version = "0.1.0",
        description = "API for recording and retrieving health checkup results",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "HealthCheckup API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        assert!(tags.iter().any(|tag| tag.name == "health"));
        assert!(tags.iter().any(|tag| tag.name == "health_records"));

        assert!(openapi.paths.paths.contains_key("/health"));
        assert!(openapi.paths.paths.contains_key("/metrics"));
        assert!(openapi.paths.paths.contains_key("/health-records"));
        assert!(openapi.paths.paths.contains_key("/health-records/{id}"));
    }

    #[test]
    fn test_envelope_schemas_registered() {
        let openapi = ApiDoc::openapi();
        let schemas = &openapi.components.as_ref().unwrap().schemas;

        assert!(schemas.contains_key("HealthRecordEnvelope"));
        assert!(schemas.contains_key("HealthRecordListEnvelope"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
