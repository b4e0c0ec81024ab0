//! Reply parser and risk classifier
//!
//! Turns the unconstrained free text coming back from the inference gateway
//! into a strongly-typed `AnalysisResult`. The parser is total: it never fails
//! on malformed input and degrades field-by-field to the injected defaults.

use chrono::Utc;
use regex::Regex;

use crate::model::{AnalysisResult, ClassifierDefaults, ModelReply, RiskLevel};

/// Extracts labeled fields from a model reply and classifies the risk
///
/// Field extraction is anchored to literal labels (`DETECTION:`, `CONFIDENCE:`,
/// `RISK_SCORE:`, `RISK_LEVEL:`, `ANALYSIS:`) and is case-insensitive in both
/// label and value. Stateless across invocations.
pub struct ReplyParser {
    detection: Regex,
    confidence: Regex,
    risk_score: Regex,
    risk_level: Regex,
    analysis: Regex,
    defaults: ClassifierDefaults,
}

impl ReplyParser {
    pub fn new(defaults: ClassifierDefaults) -> Self {
        Self {
            detection: Regex::new(r"(?i)DETECTION:\s*(YES|NO|UNCERTAIN)").unwrap(),
            confidence: Regex::new(r"(?i)CONFIDENCE:\s*(LOW|MEDIUM|HIGH)").unwrap(),
            risk_score: Regex::new(r"(?i)RISK_SCORE:\s*(\d+)").unwrap(),
            risk_level: Regex::new(r"(?i)RISK_LEVEL:\s*(LOW|MODERATE|HIGH|EXTREME)").unwrap(),
            // The explanation runs until the first blank line or end of input
            analysis: Regex::new(r"(?is)ANALYSIS:\s*(.+?)(?:\n\s*\n|$)").unwrap(),
            defaults,
        }
    }

    /// Parse a reply into a normalized result; cannot fail
    pub fn parse(&self, reply: &ModelReply) -> AnalysisResult {
        let text = reply.as_str();

        let detection = self
            .capture(&self.detection, text)
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.defaults.detection);

        let confidence = self
            .capture(&self.confidence, text)
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.defaults.confidence);

        let risk_score = self
            .capture(&self.risk_score, text)
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(self.defaults.risk_score);

        if !(1..=10).contains(&risk_score) {
            // Accepted as-is; the upstream generator cannot be fully constrained
            tracing::warn!(risk_score, "Risk score outside the nominal 1-10 range");
        }

        let explicit_level: Option<RiskLevel> = self
            .capture(&self.risk_level, text)
            .and_then(|v| v.parse().ok());

        let derived_level = RiskLevel::from_score(risk_score);
        if let Some(explicit) = explicit_level {
            if explicit != derived_level {
                tracing::warn!(
                    ?explicit,
                    ?derived_level,
                    risk_score,
                    "Explicit risk level disagrees with score-derived level; keeping explicit"
                );
            }
        }
        let risk_level = explicit_level.unwrap_or(derived_level);

        let analysis = self
            .analysis
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| text.to_string());

        AnalysisResult {
            detection,
            confidence,
            risk_score,
            risk_level,
            analysis,
            raw_reply: Some(text.to_string()),
            timestamp: Utc::now(),
        }
    }

    fn capture<'t>(&self, pattern: &Regex, text: &'t str) -> Option<&'t str> {
        pattern.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
    }
}

impl Default for ReplyParser {
    fn default() -> Self {
        Self::new(ClassifierDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConfidenceLevel, Detection};

    fn parse(text: &str) -> AnalysisResult {
        ReplyParser::default().parse(&ModelReply::new(text))
    }

    #[test]
    fn well_formed_reply_round_trips() {
        let result = parse(
            "DETECTION: YES\nCONFIDENCE: High\nRISK_SCORE: 9\nRISK_LEVEL: Extreme\nANALYSIS: Visible flame and smoke plume.\n\n",
        );
        assert_eq!(result.detection, Detection::Yes);
        assert_eq!(result.confidence, ConfidenceLevel::High);
        assert_eq!(result.risk_score, 9);
        assert_eq!(result.risk_level, RiskLevel::Extreme);
        assert_eq!(result.analysis, "Visible flame and smoke plume.");
        assert_eq!(
            result.raw_reply.as_deref(),
            Some("DETECTION: YES\nCONFIDENCE: High\nRISK_SCORE: 9\nRISK_LEVEL: Extreme\nANALYSIS: Visible flame and smoke plume.\n\n")
        );
    }

    #[test]
    fn missing_risk_level_is_derived_from_score() {
        let result = parse("DETECTION: NO\nCONFIDENCE: Low\nRISK_SCORE: 2\nANALYSIS: No signs of fire.");
        assert_eq!(result.detection, Detection::No);
        assert_eq!(result.confidence, ConfidenceLevel::Low);
        assert_eq!(result.risk_score, 2);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.analysis, "No signs of fire.");
    }

    #[test]
    fn unstructured_reply_degrades_to_defaults() {
        let result = parse("I cannot tell from this image.");
        assert_eq!(result.detection, Detection::Uncertain);
        assert_eq!(result.confidence, ConfidenceLevel::Medium);
        assert_eq!(result.risk_score, 5);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert_eq!(result.analysis, "I cannot tell from this image.");
    }

    #[test]
    fn empty_reply_degrades_to_defaults() {
        let result = parse("");
        assert_eq!(result.detection, Detection::Uncertain);
        assert_eq!(result.confidence, ConfidenceLevel::Medium);
        assert_eq!(result.risk_score, 5);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert_eq!(result.analysis, "");
    }

    #[test]
    fn derived_level_matches_bucket_boundaries() {
        for (score, expected) in [
            (3, RiskLevel::Low),
            (4, RiskLevel::Moderate),
            (6, RiskLevel::Moderate),
            (7, RiskLevel::High),
            (8, RiskLevel::High),
            (9, RiskLevel::Extreme),
        ] {
            let result = parse(&format!("RISK_SCORE: {}", score));
            assert_eq!(result.risk_level, expected, "score {}", score);
        }
    }

    #[test]
    fn labels_and_values_match_case_insensitively() {
        let result = parse("detection: yes\nconfidence: HIGH\nrisk_score: 8\nrisk_level: high");
        assert_eq!(result.detection, Detection::Yes);
        assert_eq!(result.confidence, ConfidenceLevel::High);
        assert_eq!(result.risk_score, 8);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn explicit_risk_level_wins_over_score() {
        // Deliberately tolerant: the explicit label takes precedence even when
        // inconsistent with the numeric score
        let result = parse("RISK_SCORE: 2\nRISK_LEVEL: Extreme");
        assert_eq!(result.risk_score, 2);
        assert_eq!(result.risk_level, RiskLevel::Extreme);
    }

    #[test]
    fn out_of_range_score_is_kept_unclamped() {
        let result = parse("RISK_SCORE: 47");
        assert_eq!(result.risk_score, 47);
        assert_eq!(result.risk_level, RiskLevel::Extreme);
    }

    #[test]
    fn out_of_vocabulary_detection_falls_back() {
        let result = parse("DETECTION: MAYBE\nRISK_SCORE: 7");
        assert_eq!(result.detection, Detection::Uncertain);
        assert_eq!(result.risk_score, 7);
    }

    #[test]
    fn analysis_is_truncated_at_first_blank_line() {
        let result = parse("ANALYSIS: First paragraph.\n\nSecond paragraph that gets clipped.");
        assert_eq!(result.analysis, "First paragraph.");
    }

    #[test]
    fn analysis_keeps_single_newlines() {
        let result = parse("ANALYSIS: Line one.\nLine two.");
        assert_eq!(result.analysis, "Line one.\nLine two.");
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "DETECTION: YES\nCONFIDENCE: Medium\nRISK_SCORE: 6\nANALYSIS: Smoke haze near the ridge.";
        let first = parse(text);
        let second = parse(text);
        assert_eq!(first.detection, second.detection);
        assert_eq!(first.confidence, second.confidence);
        assert_eq!(first.risk_score, second.risk_score);
        assert_eq!(first.risk_level, second.risk_level);
        assert_eq!(first.analysis, second.analysis);
        assert_eq!(first.raw_reply, second.raw_reply);
    }

    #[test]
    fn custom_defaults_are_honored() {
        let parser = ReplyParser::new(ClassifierDefaults {
            detection: Detection::No,
            confidence: ConfidenceLevel::Low,
            risk_score: 1,
        });
        let result = parser.parse(&ModelReply::new("nothing labeled here"));
        assert_eq!(result.detection, Detection::No);
        assert_eq!(result.confidence, ConfidenceLevel::Low);
        assert_eq!(result.risk_score, 1);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }
}
