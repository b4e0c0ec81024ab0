pub mod analysis;
pub mod config;
pub mod fire;
pub mod weather;

pub use analysis::{
    AnalysisRequest, AnalysisResult, ClassifierDefaults, ConfidenceLevel, Detection, MediaKind,
    ModelReply, RiskLevel, ValidationError, MAX_UPLOAD_BYTES,
};
pub use config::{Config, LocationConfig, OpenAiConfig};
pub use fire::FireSummary;
pub use weather::WeatherReport;
