//! OpenWeatherMap client service
//!
//! The weather endpoint never fails: a missing API key or an upstream error
//! degrades to a static fallback report carrying an explanatory note.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{LocationConfig, WeatherReport};

const OPENWEATHER_API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const OPENWEATHER_BASE_URL_ENV: &str = "OPENWEATHER_BASE_URL";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the OpenWeatherMap current-weather API
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    location: LocationConfig,
}

/// Subset of the OpenWeatherMap current-weather response
#[derive(Deserialize)]
struct OwmResponse {
    main: OwmMain,
    wind: OwmWind,
    weather: Vec<OwmCondition>,
}

#[derive(Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: u32,
}

#[derive(Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Deserialize)]
struct OwmCondition {
    description: String,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>, location: LocationConfig) -> Self {
        let base_url = std::env::var(OPENWEATHER_BASE_URL_ENV)
            .ok()
            .unwrap_or_else(|| OPENWEATHER_API_BASE_URL.to_string());

        Self::with_settings(
            api_key,
            location,
            base_url,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }

    fn with_settings(
        api_key: Option<String>,
        location: LocationConfig,
        base_url: String,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            api_key,
            location,
        }
    }

    /// Fetch the current weather for the configured location
    ///
    /// Infallible by design: any failure path returns fallback data.
    pub async fn current(&self) -> WeatherReport {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("OpenWeather API key is missing, using fallback data");
            return WeatherReport::fallback(
                &self.location.name,
                "Using fallback data - API key missing",
            );
        };

        match self.fetch(api_key).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "OpenWeatherMap API error, using fallback data");
                WeatherReport::fallback(&self.location.name, "Using fallback data - API call failed")
            }
        }
    }

    async fn fetch(&self, api_key: &str) -> Result<WeatherReport, reqwest::Error> {
        let url = format!(
            "{}/weather?lat={}&lon={}&units=metric&appid={}",
            self.base_url, self.location.latitude, self.location.longitude, api_key
        );

        tracing::debug!(
            lat = self.location.latitude,
            lon = self.location.longitude,
            "Fetching weather data from OpenWeatherMap"
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: OwmResponse = response.json().await?;

        Ok(WeatherReport {
            location: self.location.name.clone(),
            temperature: body.main.temp,
            humidity: body.main.humidity,
            wind_speed: body.wind.speed,
            description: body
                .weather
                .first()
                .map(|c| c.description.clone())
                .unwrap_or_default(),
            timestamp: Utc::now(),
            note: None,
        })
    }
}
