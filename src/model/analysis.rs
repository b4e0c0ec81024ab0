//! Data model for the image/audio analysis flow
//!
//! `AnalysisRequest` is the validated upload, `ModelReply` the untrusted text
//! coming back from the inference gateway, and `AnalysisResult` the normalized
//! classification handed to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Maximum accepted upload size: 5 MB
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];
const AUDIO_TYPES: &[&str] = &["audio/wav", "audio/x-wav", "audio/mpeg", "audio/mp3", "audio/webm"];

/// Upload modality, which determines the allowed MIME types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    pub fn allowed_types(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Image => IMAGE_TYPES,
            MediaKind::Audio => AUDIO_TYPES,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
        }
    }
}

/// Input constraint violations, surfaced before any upstream call
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("no {0} file found in upload")]
    MissingFile(&'static str),

    #[error("file is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("unsupported {kind} type: {mime}")]
    UnsupportedType { kind: &'static str, mime: String },

    #[error("failed to read multipart payload: {0}")]
    Unreadable(String),
}

/// A validated upload held in memory for the duration of the request
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
}

impl AnalysisRequest {
    /// Build a request from raw upload parts, enforcing the size and MIME
    /// constraints for the given modality.
    pub fn new(
        bytes: Vec<u8>,
        mime_type: String,
        filename: String,
        kind: MediaKind,
    ) -> Result<Self, ValidationError> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::TooLarge {
                size: bytes.len(),
                limit: MAX_UPLOAD_BYTES,
            });
        }

        // Browsers append codec parameters (e.g. "audio/webm;codecs=opus")
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if !kind.allowed_types().contains(&essence.as_str()) {
            return Err(ValidationError::UnsupportedType {
                kind: kind.label(),
                mime: mime_type,
            });
        }

        Ok(Self {
            bytes,
            mime_type: essence,
            filename,
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Opaque free-text reply from the inference gateway
///
/// No internal structure is guaranteed; the parser treats it as untrusted,
/// possibly malformed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply(String);

impl ModelReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether fire was detected in the submitted image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Detection {
    Yes,
    No,
    Uncertain,
}

impl FromStr for Detection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YES" => Ok(Detection::Yes),
            "NO" => Ok(Detection::No),
            "UNCERTAIN" => Ok(Detection::Uncertain),
            _ => Err(()),
        }
    }
}

/// Model-reported confidence in its own detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl FromStr for ConfidenceLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ConfidenceLevel::Low),
            "medium" => Ok(ConfidenceLevel::Medium),
            "high" => Ok(ConfidenceLevel::High),
            _ => Err(()),
        }
    }
}

/// Qualitative risk label derived from (or overriding) the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl RiskLevel {
    /// Fixed risk bucket table: 1-3 Low, 4-6 Moderate, 7-8 High, 9-10 Extreme.
    /// Out-of-range scores land in the nearest bucket.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=3 => RiskLevel::Low,
            4..=6 => RiskLevel::Moderate,
            7..=8 => RiskLevel::High,
            _ => RiskLevel::Extreme,
        }
    }
}

impl FromStr for RiskLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            "extreme" => Ok(RiskLevel::Extreme),
            _ => Err(()),
        }
    }
}

/// Parsed, normalized classification of a model reply
///
/// Created once per request and never mutated afterwards; not persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub detection: Detection,
    pub confidence: ConfidenceLevel,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub analysis: String,
    /// Original unmodified reply, retained for auditability
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_reply: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Immutable defaults applied when a reply field is missing or malformed
#[derive(Debug, Clone, Copy)]
pub struct ClassifierDefaults {
    pub detection: Detection,
    pub confidence: ConfidenceLevel,
    pub risk_score: u32,
}

impl Default for ClassifierDefaults {
    fn default() -> Self {
        Self {
            detection: Detection::Uncertain,
            confidence: ConfidenceLevel::Medium,
            risk_score: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_upload_is_rejected() {
        let bytes = vec![0u8; 6 * 1024 * 1024];
        let result = AnalysisRequest::new(
            bytes,
            "image/jpeg".to_string(),
            "big.jpg".to_string(),
            MediaKind::Image,
        );
        match result {
            Err(ValidationError::TooLarge { size, limit }) => {
                assert_eq!(size, 6 * 1024 * 1024);
                assert_eq!(limit, MAX_UPLOAD_BYTES);
            }
            other => panic!("expected TooLarge, got {:?}", other.map(|r| r.size())),
        }
    }

    #[test]
    fn gif_upload_is_rejected() {
        let result = AnalysisRequest::new(
            vec![1, 2, 3],
            "image/gif".to_string(),
            "anim.gif".to_string(),
            MediaKind::Image,
        );
        match result {
            Err(ValidationError::UnsupportedType { kind, mime }) => {
                assert_eq!(kind, "image");
                assert_eq!(mime, "image/gif");
            }
            other => panic!("expected UnsupportedType, got {:?}", other.map(|r| r.mime_type)),
        }
    }

    #[test]
    fn webm_with_codec_parameters_is_accepted() {
        let request = AnalysisRequest::new(
            vec![1, 2, 3],
            "audio/webm;codecs=opus".to_string(),
            "clip.webm".to_string(),
            MediaKind::Audio,
        )
        .unwrap();
        assert_eq!(request.mime_type, "audio/webm");
        assert_eq!(request.size(), 3);
    }

    #[test]
    fn jpeg_at_exact_limit_is_accepted() {
        let request = AnalysisRequest::new(
            vec![0u8; MAX_UPLOAD_BYTES],
            "image/jpeg".to_string(),
            "limit.jpg".to_string(),
            MediaKind::Image,
        )
        .unwrap();
        assert_eq!(request.size(), MAX_UPLOAD_BYTES);
    }

    #[test]
    fn risk_buckets_match_fixed_table() {
        assert_eq!(RiskLevel::from_score(1), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(3), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(4), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(6), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(7), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(8), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(9), RiskLevel::Extreme);
        assert_eq!(RiskLevel::from_score(10), RiskLevel::Extreme);
    }

    #[test]
    fn vocabulary_parsing_is_case_insensitive() {
        assert_eq!("yes".parse::<Detection>(), Ok(Detection::Yes));
        assert_eq!("HIGH".parse::<ConfidenceLevel>(), Ok(ConfidenceLevel::High));
        assert_eq!("extreme".parse::<RiskLevel>(), Ok(RiskLevel::Extreme));
        assert!("maybe".parse::<Detection>().is_err());
    }
}
