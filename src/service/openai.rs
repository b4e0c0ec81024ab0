//! OpenAI API client implementing the inference gateway
//!
//! One bounded-timeout request per call: chat completions for chat and vision
//! analysis, the transcriptions endpoint for audio.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::model::{AnalysisRequest, ModelReply, OpenAiConfig};
use crate::service::gateway::{InferenceGateway, UpstreamError};

const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Client for the OpenAI chat, vision, and transcription endpoints
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    config: OpenAiConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Error body shape returned by the OpenAI API
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiClient {
    /// Create a client holding the API key in its default headers
    ///
    /// The base URL is resolved from `OPENAI_BASE_URL` if set, otherwise the
    /// public API endpoint.
    pub fn new(api_key: &str, config: OpenAiConfig) -> Result<Self, String> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| format!("Invalid API key: {}", e))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

        let base_url = std::env::var(OPENAI_BASE_URL_ENV)
            .ok()
            .unwrap_or_else(|| OPENAI_API_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    async fn chat_completion(&self, request: &ChatRequest<'_>) -> Result<String, UpstreamError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self.client.post(&url).json(request).send().await?;
        let response = check_status(response).await?;

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(UpstreamError::EmptyReply)
    }
}

/// Map non-success statuses to `UpstreamError::Api` with the provider's message
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.error.message)
        .unwrap_or(body);

    Err(UpstreamError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl InferenceGateway for OpenAiClient {
    async fn analyze_image(
        &self,
        request: &AnalysisRequest,
        prompt: &str,
    ) -> Result<ModelReply, UpstreamError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&request.bytes);
        let data_url = format!("data:{};base64,{}", request.mime_type, encoded);

        tracing::debug!(
            filename = %request.filename,
            size = request.size(),
            model = %self.config.vision_model,
            "Submitting image for analysis"
        );

        let chat_request = ChatRequest {
            model: &self.config.vision_model,
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text { text: prompt },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ]),
            }],
            max_tokens: 500,
        };

        let reply = self.chat_completion(&chat_request).await?;
        Ok(ModelReply::new(reply))
    }

    async fn transcribe(
        &self,
        request: &AnalysisRequest,
        language: Option<&str>,
    ) -> Result<String, UpstreamError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        tracing::debug!(
            filename = %request.filename,
            size = request.size(),
            language = ?language,
            model = %self.config.transcription_model,
            "Submitting audio for transcription"
        );

        let file_part = reqwest::multipart::Part::bytes(request.bytes.clone())
            .file_name(request.filename.clone())
            .mime_str(&request.mime_type)
            .map_err(|e| UpstreamError::Api {
                status: 0,
                message: format!("Invalid MIME type for upload: {}", e),
            })?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.config.transcription_model.clone());

        if let Some(lang) = language {
            form = form.text("language", lang.to_string());
        }

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = check_status(response).await?;

        let body: TranscriptionResponse = response.json().await?;
        Ok(body.text)
    }

    async fn chat(&self, system_prompt: &str, message: &str) -> Result<String, UpstreamError> {
        let chat_request = ChatRequest {
            model: &self.config.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(system_prompt),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(message),
                },
            ],
            max_tokens: 500,
        };

        self.chat_completion(&chat_request).await
    }
}
