pub mod analysis;
pub mod firms;
pub mod gateway;
pub mod openai;
pub mod parser;
pub mod prompts;
pub mod weather;

pub use analysis::AnalysisService;
pub use firms::FirmsClient;
pub use gateway::{InferenceGateway, UpstreamError};
pub use openai::OpenAiClient;
pub use parser::ReplyParser;
pub use weather::WeatherClient;
