// Prediction orchestrator — sequences scorer, label decision, rationale
// extraction, and redaction into one result.
//
// Per request the flow is: score -> label -> (rationale)? -> (redacted)? ->
// assemble. No state survives the call; the only shared object is the scorer,
// which is read-only after construction, so concurrent predictions need no
// coordination.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use crate::model::traits::Scorer;

use super::label::choose_label;
use super::rationale::extract_spans;
use super::redact::redact;
use super::types::{PredictRequest, PredictionMeta, PredictionResult};

/// The prediction pipeline. Owns its scorer as an injected dependency —
/// there is no ambient global model.
pub struct Predictor {
    scorer: Arc<dyn Scorer>,
}

impl Predictor {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self { scorer }
    }

    /// Version string of the underlying model, for health reporting.
    pub fn model_version(&self) -> String {
        self.scorer.model_version()
    }

    /// Run the full pipeline for one validated request.
    ///
    /// A scorer failure (or a corrupt distribution) aborts the whole request;
    /// extraction and redaction cannot fail on spans this pipeline produced.
    pub async fn predict(&self, req: &PredictRequest) -> Result<PredictionResult> {
        let started = Instant::now();

        let scores = self
            .scorer
            .score(&req.text)
            .await
            .context("scorer failed to produce a distribution")?;
        scores.validate()?;

        let label = choose_label(&scores, req.threshold);
        let confidence = scores.for_label(label);

        let rationale = if req.include_rationale {
            extract_spans(&req.text, req.top_k)
        } else {
            None
        };

        let redacted_text = if req.redact_flagged {
            redact(&req.text, rationale.as_deref(), req.redaction_mode)?
        } else {
            None
        };

        let latency_ms = round2(started.elapsed().as_secs_f64() * 1000.0);

        debug!(
            label = %label,
            confidence,
            latency_ms,
            spans = rationale.as_ref().map(|r| r.len()).unwrap_or(0),
            "prediction assembled"
        );

        Ok(PredictionResult {
            label,
            confidence,
            scores,
            rationale,
            redacted_text,
            meta: PredictionMeta {
                latency_ms,
                threshold_used: req.threshold,
            },
        })
    }
}

/// Round to 2 decimal places for the latency field.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
