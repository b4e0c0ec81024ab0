//! Active fire detection model

use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

/// Summary of active fire detections returned by the wildfire endpoint
///
/// Detection records are header-keyed objects parsed from the FIRMS CSV feed,
/// so the field set follows whatever columns the satellite product reports.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FireSummary {
    pub success: bool,
    pub count: usize,
    /// Present when the summary is static demo data rather than live data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Value>,
}

impl FireSummary {
    pub fn new(data: Vec<Value>) -> Self {
        Self {
            success: true,
            count: data.len(),
            note: None,
            data,
        }
    }

    /// Static demo detections used when the FIRMS API is unavailable
    pub fn demo(note: &str) -> Self {
        let data = vec![
            json!({
                "latitude": 37.7749,
                "longitude": -122.4194,
                "brightness": 325.4,
                "scan": 0.5,
                "track": 0.5,
                "acq_date": "2023-10-15",
                "acq_time": 1540,
                "confidence": "high",
                "version": "1.0",
                "bright_t31": 292.9,
                "frp": 12.5
            }),
            json!({
                "latitude": 34.0522,
                "longitude": -118.2437,
                "brightness": 340.2,
                "scan": 0.5,
                "track": 0.5,
                "acq_date": "2023-10-15",
                "acq_time": 1545,
                "confidence": "high",
                "version": "1.0",
                "bright_t31": 295.7,
                "frp": 18.2
            }),
            json!({
                "latitude": 37.3382,
                "longitude": -121.8863,
                "brightness": 315.9,
                "scan": 0.5,
                "track": 0.5,
                "acq_date": "2023-10-15",
                "acq_time": 1548,
                "confidence": "nominal",
                "version": "1.0",
                "bright_t31": 290.5,
                "frp": 8.7
            }),
        ];

        Self {
            success: true,
            count: data.len(),
            note: Some(note.to_string()),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_summary_has_three_detections() {
        let summary = FireSummary::demo("Using demo data due to API limitations");
        assert!(summary.success);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.data.len(), 3);
        assert!(summary.note.is_some());
    }
}
