//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, reservations};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hotel Dashboard API",
        version = "0.1.0",
        description = "Hotel reservation records for the visitor dashboard"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        health::health_check,
        health::readiness_check,
        reservations::fetch_all_reservations,
    ),
    components(
        schemas(
            crate::models::reservation::ReservationRecord,
            crate::models::ingestion::IngestionReport,
            crate::models::ingestion::IngestionStatus,
            health::HealthResponse,
            health::ReadinessResponse,
            crate::error::ErrorResponse,
            crate::error::RecordError,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "reservations", description = "Reservation records")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
