// Request and result types for the prediction pipeline.
//
// Everything here is a per-request value object: constructed fresh, handed
// through the pipeline, serialized by the transport layer, then dropped.
// Validation happens at construction so invalid inputs never reach the core.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Maximum accepted input length, in characters (matches the API contract).
pub const MAX_TEXT_CHARS: usize = 5000;

/// Default number of rationale spans to collect.
pub const DEFAULT_TOP_K: usize = 1;

/// The discrete classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Toxic,
    NonToxic,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Toxic => "toxic",
            Label::NonToxic => "non_toxic",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How matched spans are replaced in the redacted copy of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionMode {
    /// Replace each span with the literal string `[REDACTED]`.
    #[default]
    Token,
    /// Replace alphanumeric characters with `*`, preserving length and
    /// punctuation.
    Mask,
}

/// Probability distribution over the two classes, as produced by a scorer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreDistribution {
    pub non_toxic: f64,
    pub toxic: f64,
}

impl ScoreDistribution {
    /// Check that both probabilities are in [0, 1] and sum to ~1.0.
    ///
    /// A scorer that fails this produced a corrupt distribution — that is a
    /// model problem, fatal for the request, not something to paper over.
    pub fn validate(&self) -> Result<()> {
        let in_range = |p: f64| (0.0..=1.0).contains(&p);
        if !in_range(self.toxic) || !in_range(self.non_toxic) {
            anyhow::bail!(
                "scorer produced out-of-range probabilities: non_toxic={}, toxic={}",
                self.non_toxic,
                self.toxic
            );
        }
        let sum = self.toxic + self.non_toxic;
        if (sum - 1.0).abs() > 1e-6 {
            anyhow::bail!("scorer probabilities sum to {sum}, expected ~1.0");
        }
        Ok(())
    }

    /// The probability of the given label under this distribution.
    pub fn for_label(&self, label: Label) -> f64 {
        match label {
            Label::Toxic => self.toxic,
            Label::NonToxic => self.non_toxic,
        }
    }
}

/// A substring of the input that drove the toxicity decision.
///
/// `start` and `end` are 0-based character offsets into the original text
/// (`start < end <= text.chars().count()`). Downstream consumers operate on
/// offsets only — no aliasing of the input buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RationaleSpan {
    /// The matched substring, in the original casing.
    #[serde(rename = "span")]
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Relevance weight (non-negative). Keyword matches carry 1.0.
    pub weight: f64,
}

/// A validated prediction request. Construct via [`PredictRequest::new`];
/// invalid values are rejected before the pipeline runs.
#[derive(Debug, Clone)]
pub struct PredictRequest {
    pub text: String,
    pub include_rationale: bool,
    pub redact_flagged: bool,
    pub threshold: f64,
    pub top_k: usize,
    pub redaction_mode: RedactionMode,
}

impl PredictRequest {
    /// Validate and construct a request.
    ///
    /// Rejects: empty text, text over [`MAX_TEXT_CHARS`] characters,
    /// a threshold outside [0, 1], and `top_k == 0`.
    pub fn new(
        text: String,
        include_rationale: bool,
        redact_flagged: bool,
        threshold: f64,
        top_k: usize,
        redaction_mode: RedactionMode,
    ) -> Result<Self> {
        let char_count = text.chars().count();
        if char_count == 0 {
            anyhow::bail!("text must not be empty");
        }
        if char_count > MAX_TEXT_CHARS {
            anyhow::bail!("text is {char_count} characters, maximum is {MAX_TEXT_CHARS}");
        }
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("threshold must be in [0, 1], got {threshold}");
        }
        if top_k == 0 {
            anyhow::bail!("top_k must be at least 1");
        }
        Ok(Self {
            text,
            include_rationale,
            redact_flagged,
            threshold,
            top_k,
            redaction_mode,
        })
    }
}

/// Timing and configuration echo attached to every result.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionMeta {
    /// Wall-clock pipeline time in milliseconds, rounded to 2 decimal places.
    pub latency_ms: f64,
    /// The threshold actually applied to the label decision.
    pub threshold_used: f64,
}

/// The assembled outcome of one prediction call.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub label: Label,
    /// Probability of the *chosen* label — not necessarily the max of the two
    /// class probabilities when threshold != 0.5.
    pub confidence: f64,
    pub scores: ScoreDistribution,
    /// Absent when rationale extraction was skipped or found nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<Vec<RationaleSpan>>,
    /// Absent unless redaction was requested and rationale spans exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redacted_text: Option<String>,
    pub meta: PredictionMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let req = PredictRequest::new(
            "hello".to_string(),
            true,
            false,
            0.5,
            1,
            RedactionMode::Token,
        );
        assert!(req.is_ok());
    }

    #[test]
    fn test_empty_text_rejected() {
        let req =
            PredictRequest::new(String::new(), true, false, 0.5, 1, RedactionMode::Token);
        assert!(req.is_err());
    }

    #[test]
    fn test_max_length_boundary() {
        // Exactly MAX_TEXT_CHARS is accepted; one more is rejected.
        let at_limit = "a".repeat(MAX_TEXT_CHARS);
        assert!(
            PredictRequest::new(at_limit, true, false, 0.5, 1, RedactionMode::Token).is_ok()
        );
        let over_limit = "a".repeat(MAX_TEXT_CHARS + 1);
        assert!(
            PredictRequest::new(over_limit, true, false, 0.5, 1, RedactionMode::Token).is_err()
        );
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        for bad in [-0.1, 1.1, f64::NAN] {
            assert!(
                PredictRequest::new(
                    "hello".to_string(),
                    true,
                    false,
                    bad,
                    1,
                    RedactionMode::Token
                )
                .is_err(),
                "threshold {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_zero_top_k_rejected() {
        assert!(PredictRequest::new(
            "hello".to_string(),
            true,
            false,
            0.5,
            0,
            RedactionMode::Token
        )
        .is_err());
    }

    #[test]
    fn test_distribution_validate_accepts_proper() {
        let scores = ScoreDistribution {
            non_toxic: 0.06,
            toxic: 0.94,
        };
        assert!(scores.validate().is_ok());
    }

    #[test]
    fn test_distribution_validate_rejects_bad_sum() {
        let scores = ScoreDistribution {
            non_toxic: 0.5,
            toxic: 0.6,
        };
        assert!(scores.validate().is_err());
    }

    #[test]
    fn test_distribution_validate_rejects_out_of_range() {
        let scores = ScoreDistribution {
            non_toxic: -0.2,
            toxic: 1.2,
        };
        assert!(scores.validate().is_err());
    }

    #[test]
    fn test_label_serialization_names() {
        assert_eq!(
            serde_json::to_string(&Label::Toxic).unwrap(),
            "\"toxic\""
        );
        assert_eq!(
            serde_json::to_string(&Label::NonToxic).unwrap(),
            "\"non_toxic\""
        );
    }
}
