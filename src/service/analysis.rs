//! Analysis orchestration service
//!
//! Ties the validated upload to the inference gateway and the reply parser.
//! The gateway is optional: without an OpenAI key the AI-backed operations are
//! disabled and report so, rather than failing at startup.

use std::sync::Arc;

use crate::model::{AnalysisRequest, AnalysisResult};
use crate::service::gateway::{InferenceGateway, UpstreamError};
use crate::service::parser::ReplyParser;
use crate::service::prompts::{CHAT_SYSTEM_PROMPT, IMAGE_ANALYSIS_PROMPT};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("OPENAI_API_KEY is not configured")]
    Disabled,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Service behind the chat, transcription, and image-analysis endpoints
pub struct AnalysisService {
    gateway: Option<Arc<dyn InferenceGateway>>,
    parser: ReplyParser,
}

impl AnalysisService {
    pub fn new(gateway: Option<Arc<dyn InferenceGateway>>, parser: ReplyParser) -> Self {
        Self { gateway, parser }
    }

    /// Whether the inference gateway is configured
    pub fn is_enabled(&self) -> bool {
        self.gateway.is_some()
    }

    /// Analyze an uploaded image for wildfire signs
    ///
    /// The upstream call is the only fallible step; parsing always yields a
    /// best-effort result.
    pub async fn analyze_image(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let gateway = self.gateway.as_ref().ok_or(AnalysisError::Disabled)?;

        let reply = gateway.analyze_image(request, IMAGE_ANALYSIS_PROMPT).await?;
        let result = self.parser.parse(&reply);

        tracing::info!(
            detection = ?result.detection,
            confidence = ?result.confidence,
            risk_score = result.risk_score,
            risk_level = ?result.risk_level,
            "Image analysis completed"
        );

        Ok(result)
    }

    /// Transcribe an uploaded audio clip
    pub async fn transcribe(
        &self,
        request: &AnalysisRequest,
        language: Option<&str>,
    ) -> Result<String, AnalysisError> {
        let gateway = self.gateway.as_ref().ok_or(AnalysisError::Disabled)?;
        let transcription = gateway.transcribe(request, language).await?;

        tracing::info!(chars = transcription.len(), "Transcription completed");
        Ok(transcription)
    }

    /// Answer a chat message with the wildfire assistant prompt
    pub async fn chat(&self, message: &str) -> Result<String, AnalysisError> {
        let gateway = self.gateway.as_ref().ok_or(AnalysisError::Disabled)?;
        Ok(gateway.chat(CHAT_SYSTEM_PROMPT, message).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConfidenceLevel, Detection, MediaKind, ModelReply, RiskLevel};
    use async_trait::async_trait;

    /// Gateway that returns a fixed reply for every call
    struct ScriptedGateway {
        reply: String,
    }

    #[async_trait]
    impl InferenceGateway for ScriptedGateway {
        async fn analyze_image(
            &self,
            _request: &AnalysisRequest,
            _prompt: &str,
        ) -> Result<ModelReply, UpstreamError> {
            Ok(ModelReply::new(self.reply.clone()))
        }

        async fn transcribe(
            &self,
            _request: &AnalysisRequest,
            _language: Option<&str>,
        ) -> Result<String, UpstreamError> {
            Ok(self.reply.clone())
        }

        async fn chat(&self, _system_prompt: &str, _message: &str) -> Result<String, UpstreamError> {
            Ok(self.reply.clone())
        }
    }

    fn image_request() -> AnalysisRequest {
        AnalysisRequest::new(
            vec![0xFF, 0xD8, 0xFF],
            "image/jpeg".to_string(),
            "frame.jpg".to_string(),
            MediaKind::Image,
        )
        .unwrap()
    }

    fn service_with_reply(reply: &str) -> AnalysisService {
        AnalysisService::new(
            Some(Arc::new(ScriptedGateway {
                reply: reply.to_string(),
            })),
            ReplyParser::default(),
        )
    }

    #[tokio::test]
    async fn structured_reply_is_classified() {
        let service = service_with_reply(
            "DETECTION: YES\nCONFIDENCE: High\nRISK_SCORE: 9\nRISK_LEVEL: Extreme\nANALYSIS: Visible flame and smoke plume.\n\n",
        );
        let result = service.analyze_image(&image_request()).await.unwrap();
        assert_eq!(result.detection, Detection::Yes);
        assert_eq!(result.confidence, ConfidenceLevel::High);
        assert_eq!(result.risk_score, 9);
        assert_eq!(result.risk_level, RiskLevel::Extreme);
        assert_eq!(result.analysis, "Visible flame and smoke plume.");
    }

    #[tokio::test]
    async fn unstructured_reply_still_yields_a_result() {
        let service = service_with_reply("I cannot tell from this image.");
        let result = service.analyze_image(&image_request()).await.unwrap();
        assert_eq!(result.detection, Detection::Uncertain);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert_eq!(result.analysis, "I cannot tell from this image.");
    }

    #[tokio::test]
    async fn disabled_service_reports_missing_key() {
        let service = AnalysisService::new(None, ReplyParser::default());
        assert!(!service.is_enabled());
        assert!(matches!(
            service.analyze_image(&image_request()).await,
            Err(AnalysisError::Disabled)
        ));
        assert!(matches!(
            service.chat("hello").await,
            Err(AnalysisError::Disabled)
        ));
    }
}
