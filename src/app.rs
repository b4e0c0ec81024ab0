//! Application state and service initialization
//!
//! Centralizes service construction so handlers receive everything through a
//! single `web::Data<AppState>`.

use std::sync::Arc;

use crate::model::Config;
use crate::service::{AnalysisService, FirmsClient, OpenAiClient, ReplyParser, WeatherClient};

/// Application state containing all services and shared resources
pub struct AppState {
    pub config: Config,
    pub weather: WeatherClient,
    pub firms: FirmsClient,
    pub analysis: AnalysisService,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// The OpenAI gateway is optional: without a key the analysis, chat, and
    /// transcription operations are disabled rather than the whole server.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let weather = WeatherClient::new(config.openweather_api_key.clone(), config.location.clone());
        let firms = FirmsClient::new(config.nasa_api_key.clone());

        let gateway = match config.openai_api_key.as_deref() {
            Some(api_key) => {
                let client = OpenAiClient::new(api_key, config.openai.clone())
                    .map_err(AppError::InvalidConfig)?;
                Some(Arc::new(client) as Arc<dyn crate::service::InferenceGateway>)
            }
            None => {
                tracing::warn!(
                    "OPENAI_API_KEY not set; chat, transcription, and image analysis are disabled"
                );
                None
            }
        };

        let analysis = AnalysisService::new(gateway, ReplyParser::default());

        Ok(Self {
            config,
            weather,
            firms,
            analysis,
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
