//! OpenAPI specification endpoints

use actix_web::{get, HttpResponse, Responder};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Firewatch API",
        description = "Wildfire monitoring backend: weather, active fire detections, chat, and AI-assisted image/audio analysis"
    ),
    paths(
        crate::api::status::status,
        crate::api::health::liveness,
        crate::api::health::readiness,
        crate::api::weather::current_weather,
        crate::api::wildfire::active_wildfires,
        crate::api::chat::chat_message,
        crate::api::analyze::analyze_upload,
        crate::api::analyze::transcribe_upload,
    ),
    components(schemas(
        crate::api::status::StatusResponse,
        crate::api::health::HealthStatus,
        crate::api::health::ReadinessStatus,
        crate::api::health::DependencyHealth,
        crate::api::chat::ChatMessageRequest,
        crate::api::chat::ChatReply,
        crate::api::analyze::TranscriptionReply,
        crate::api::error::ErrorResponse,
        crate::model::WeatherReport,
        crate::model::FireSummary,
        crate::model::AnalysisResult,
        crate::model::Detection,
        crate::model::ConfidenceLevel,
        crate::model::RiskLevel,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
