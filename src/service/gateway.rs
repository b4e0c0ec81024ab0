//! Inference gateway boundary
//!
//! The analysis flow depends on the external model provider only through this
//! narrow contract, so tests can substitute a scripted gateway.

use async_trait::async_trait;

use crate::model::{AnalysisRequest, ModelReply};

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("provider returned an empty reply")]
    EmptyReply,
}

/// Contract for the external vision/language/speech provider
///
/// Implementations make a single bounded-timeout request per call; no retry or
/// backoff. Replies are opaque text with no guaranteed structure.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Submit an image with a fixed instruction prompt, returning the raw reply
    async fn analyze_image(
        &self,
        request: &AnalysisRequest,
        prompt: &str,
    ) -> Result<ModelReply, UpstreamError>;

    /// Transcribe an audio clip, optionally hinting the spoken language
    async fn transcribe(
        &self,
        request: &AnalysisRequest,
        language: Option<&str>,
    ) -> Result<String, UpstreamError>;

    /// Answer a chat message under the given system prompt
    async fn chat(&self, system_prompt: &str, message: &str) -> Result<String, UpstreamError>;
}
