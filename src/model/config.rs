use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "FIREWATCH_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_OPENWEATHER_API_KEY: &str = "OPENWEATHER_API_KEY";
const ENV_NASA_API_KEY: &str = "NASA_API_KEY";
const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Monitored location for weather lookups
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_location_name")]
    pub name: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

fn default_location_name() -> String {
    "San José, California".to_string()
}

fn default_latitude() -> f64 {
    37.3382
}

fn default_longitude() -> f64 {
    -121.8863
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

/// OpenAI model selection and request bounds
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_vision_model")]
    pub vision_model: String,
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    /// Upper bound for a single upstream call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_vision_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            chat_model: default_chat_model(),
            vision_model: default_vision_model(),
            transcription_model: default_transcription_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub location: LocationConfig,
    pub openai: OpenAiConfig,
    pub openweather_api_key: Option<String>,
    pub nasa_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            location: LocationConfig::default(),
            openai: OpenAiConfig::default(),
            openweather_api_key: None,
            nasa_api_key: None,
            openai_api_key: None,
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        Self {
            host,
            port,
            location: file.location,
            openai: file.openai,
            openweather_api_key: non_empty_env(ENV_OPENWEATHER_API_KEY),
            nasa_api_key: non_empty_env(ENV_NASA_API_KEY),
            openai_api_key: non_empty_env(ENV_OPENAI_API_KEY),
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_location_is_san_jose() {
        let location = LocationConfig::default();
        assert_eq!(location.name, "San José, California");
        assert!((location.latitude - 37.3382).abs() < f64::EPSILON);
        assert!((location.longitude - -121.8863).abs() < f64::EPSILON);
    }

    #[test]
    fn config_file_defaults_apply_to_missing_sections() {
        let file: ConfigFile = serde_yaml::from_str("location:\n  name: Santa Cruz\n").unwrap();
        assert_eq!(file.location.name, "Santa Cruz");
        assert!((file.location.latitude - 37.3382).abs() < f64::EPSILON);
        assert_eq!(file.openai.transcription_model, "whisper-1");
    }
}
