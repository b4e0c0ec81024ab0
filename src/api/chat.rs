//! Wildfire assistant chat endpoint

use actix_web::{post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::app::AppState;
use crate::service::analysis::AnalysisError;

const FALLBACK_REPLY: &str = "The AI assistant is currently unavailable. For wildfire emergencies call 911; for evacuation and preparedness information visit fire.ca.gov.";

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub timestamp: DateTime<Utc>,
    /// Present when the reply is a canned fallback rather than a model answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Answer a chat message
///
/// Without an OpenAI key the endpoint still responds, with a canned fallback
/// reply marked by a `note`.
#[utoipa::path(
    post,
    path = "/api/chat/message",
    request_body = ChatMessageRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatReply),
        (status = 400, description = "Empty message", body = crate::api::error::ErrorResponse),
        (status = 502, description = "Inference provider failed", body = crate::api::error::ErrorResponse)
    ),
    tag = "chat"
)]
#[post("/api/chat/message")]
pub async fn chat_message(
    state: web::Data<AppState>,
    body: web::Json<ChatMessageRequest>,
) -> Result<HttpResponse, ApiError> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    let reply = match state.analysis.chat(message).await {
        Ok(reply) => ChatReply {
            reply,
            timestamp: Utc::now(),
            note: None,
        },
        Err(AnalysisError::Disabled) => {
            tracing::warn!("OpenAI API key is missing, returning fallback chat reply");
            ChatReply {
                reply: FALLBACK_REPLY.to_string(),
                timestamp: Utc::now(),
                note: Some("Using fallback reply - API key missing".to_string()),
            }
        }
        Err(e) => return Err(e.into()),
    };

    Ok(HttpResponse::Ok().json(reply))
}

/// Configure chat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(chat_message);
}
