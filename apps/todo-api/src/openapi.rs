//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "REST API for managing to-do items",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(axum_helpers::server::health::health_handler, crate::api::health::readiness_check),
    components(schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)),
    tags(
        (name = "health", description = "Liveness and readiness probes")
    )
)]
struct ServiceDoc;

/// Combined OpenAPI documentation for all APIs
///
/// Domain routes carry their full paths, so the domain document is merged
/// rather than nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_todo::ApiDoc::openapi());
        doc
    }
}
