// The prediction pipeline: score, decide, explain, redact.
//
// Everything in this module is pure and synchronous apart from the single
// async scorer call in the orchestrator. The transport layer constructs a
// validated PredictRequest and hands it to Predictor::predict.

pub mod label;
pub mod pipeline;
pub mod rationale;
pub mod redact;
pub mod types;

pub use pipeline::Predictor;
pub use types::{
    Label, PredictRequest, PredictionMeta, PredictionResult, RationaleSpan, RedactionMode,
    ScoreDistribution, DEFAULT_TOP_K, MAX_TEXT_CHARS,
};
