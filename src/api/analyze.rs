//! Image analysis and audio transcription endpoints

use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::api::upload::read_upload;
use crate::app::AppState;
use crate::model::MediaKind;

#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptionReply {
    pub transcription: String,
}

/// Analyze an uploaded image for wildfire signs
///
/// Expects a multipart `image` field (JPEG or PNG, up to 5 MB). The reply is
/// the parsed classification; parsing never fails, so the only error paths are
/// validation and the upstream call.
#[utoipa::path(
    post,
    path = "/api/upload/analyze",
    responses(
        (status = 200, description = "Classification of the uploaded image", body = crate::model::AnalysisResult),
        (status = 400, description = "Missing file or unsupported type", body = crate::api::error::ErrorResponse),
        (status = 413, description = "File exceeds the 5 MB limit", body = crate::api::error::ErrorResponse),
        (status = 502, description = "Inference provider failed", body = crate::api::error::ErrorResponse),
        (status = 503, description = "OpenAI key not configured", body = crate::api::error::ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/api/upload/analyze")]
pub async fn analyze_upload(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    analyze_image_inner(state, payload).await
}

/// Alias kept for older front-end builds that post to /api/analyze-image
#[post("/api/analyze-image")]
pub async fn analyze_image_alias(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    analyze_image_inner(state, payload).await
}

async fn analyze_image_inner(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (request, _) = read_upload(payload, "image", MediaKind::Image).await?;

    tracing::info!(
        filename = %request.filename,
        mime_type = %request.mime_type,
        size = request.size(),
        "Image upload accepted for analysis"
    );

    let result = state.analysis.analyze_image(&request).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Transcribe an uploaded audio clip
///
/// Expects a multipart `audio` field (WAV, MP3, or WebM, up to 5 MB) and an
/// optional `language` text field.
#[utoipa::path(
    post,
    path = "/api/transcribe",
    responses(
        (status = 200, description = "Transcribed text", body = TranscriptionReply),
        (status = 400, description = "Missing file or unsupported type", body = crate::api::error::ErrorResponse),
        (status = 413, description = "File exceeds the 5 MB limit", body = crate::api::error::ErrorResponse),
        (status = 502, description = "Inference provider failed", body = crate::api::error::ErrorResponse),
        (status = 503, description = "OpenAI key not configured", body = crate::api::error::ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/api/transcribe")]
pub async fn transcribe_upload(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (request, fields) = read_upload(payload, "audio", MediaKind::Audio).await?;

    tracing::info!(
        filename = %request.filename,
        mime_type = %request.mime_type,
        size = request.size(),
        "Audio upload accepted for transcription"
    );

    let language = fields.get("language").map(String::as_str);
    let transcription = state.analysis.transcribe(&request, language).await?;

    Ok(HttpResponse::Ok().json(TranscriptionReply { transcription }))
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze_upload)
        .service(analyze_image_alias)
        .service(transcribe_upload);
}
