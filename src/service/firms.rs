//! NASA FIRMS client service
//!
//! Fetches active fire detections as CSV (VIIRS S-NPP near-real-time product,
//! USA, last day) and converts rows into header-keyed records. A missing API
//! key is an error; an upstream failure degrades to static demo data.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value};

use crate::model::FireSummary;

const FIRMS_API_BASE_URL: &str = "https://firms.modaps.eosdis.nasa.gov/api";
const FIRMS_BASE_URL_ENV: &str = "FIRMS_BASE_URL";
const REQUEST_TIMEOUT_SECS: u64 = 30;

const FIRMS_PRODUCT: &str = "VIIRS_SNPP_NRT";
const FIRMS_COUNTRY: &str = "USA";
const FIRMS_DAY_RANGE: u8 = 1;

#[derive(Debug, thiserror::Error)]
pub enum FirmsError {
    #[error("NASA API key is missing in environment variables")]
    MissingKey,
}

/// Client for the NASA FIRMS country CSV API
pub struct FirmsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FirmsClient {
    pub fn new(api_key: Option<String>) -> Self {
        let base_url = std::env::var(FIRMS_BASE_URL_ENV)
            .ok()
            .unwrap_or_else(|| FIRMS_API_BASE_URL.to_string());

        Self::with_settings(api_key, base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    fn with_settings(api_key: Option<String>, base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Fetch active fire detections for the configured country and day range
    pub async fn active_fires(&self) -> Result<FireSummary, FirmsError> {
        let api_key = self.api_key.as_deref().ok_or(FirmsError::MissingKey)?;

        let url = format!(
            "{}/country/csv/{}/{}/{}/{}",
            self.base_url, api_key, FIRMS_PRODUCT, FIRMS_COUNTRY, FIRMS_DAY_RANGE
        );

        tracing::debug!(product = FIRMS_PRODUCT, country = FIRMS_COUNTRY, "Fetching FIRMS detections");

        match self.fetch_csv(&url).await {
            Ok(csv) => {
                let data = parse_firms_csv(&csv);
                tracing::info!(count = data.len(), "Fetched active fire detections");
                Ok(FireSummary::new(data))
            }
            Err(e) => {
                tracing::error!(error = %e, "NASA FIRMS API error, using demo data");
                Ok(FireSummary::demo("Using demo data due to API limitations"))
            }
        }
    }

    async fn fetch_csv(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.text().await
    }
}

/// Parse FIRMS CSV into header-keyed records
///
/// The first line names the columns; each following non-blank line becomes one
/// record. Values are trimmed; columns missing from a row map to null.
pub fn parse_firms_csv(csv: &str) -> Vec<Value> {
    let mut lines = csv.lines();

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let values: Vec<&str> = line.split(',').collect();
            let mut record = Map::new();
            for (i, header) in headers.iter().enumerate() {
                let value = values
                    .get(i)
                    .map(|v| Value::String(v.trim().to_string()))
                    .unwrap_or(Value::Null);
                record.insert(header.to_string(), value);
            }
            Value::Object(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_keyed_records() {
        let csv = "latitude,longitude,confidence\n37.77,-122.41,high\n34.05,-118.24,nominal\n";
        let records = parse_firms_csv(csv);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["latitude"], "37.77");
        assert_eq!(records[0]["confidence"], "high");
        assert_eq!(records[1]["longitude"], "-118.24");
    }

    #[test]
    fn trims_values_and_skips_blank_lines() {
        let csv = "latitude, confidence\n 37.77 , high \n\n   \n";
        let records = parse_firms_csv(csv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["latitude"], "37.77");
        assert_eq!(records[0]["confidence"], "high");
    }

    #[test]
    fn short_rows_fill_missing_columns_with_null() {
        let csv = "latitude,longitude,confidence\n37.77,-122.41\n";
        let records = parse_firms_csv(csv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["confidence"], Value::Null);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse_firms_csv("").is_empty());
        assert!(parse_firms_csv("latitude,longitude\n").is_empty());
    }

    #[tokio::test]
    async fn missing_key_is_an_error() {
        let client = FirmsClient::new(None);
        assert!(matches!(
            client.active_fires().await,
            Err(FirmsError::MissingKey)
        ));
    }

    #[tokio::test]
    async fn unresponsive_upstream_times_out_and_returns_demo_data() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            // Accept the connection but never answer
            let _conn = listener.accept().await;
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let client = FirmsClient::with_settings(
            Some("test-key".to_string()),
            format!("http://{}", addr),
            Duration::from_millis(250),
        );

        let summary = client.active_fires().await.unwrap();
        assert_eq!(
            summary.note.as_deref(),
            Some("Using demo data due to API limitations")
        );
        assert_eq!(summary.count, summary.data.len());
        server.abort();
    }
}
