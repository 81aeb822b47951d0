// Route handlers: POST /predict and GET /healthz.
//
// Request validation happens here, at the boundary — an invalid body or
// option set gets a 422 and never reaches the pipeline. A scorer failure
// inside the pipeline is a 500.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::classify::{PredictRequest, RedactionMode, DEFAULT_TOP_K};
use crate::web::{api_error, AppState};

/// JSON body for POST /predict.
#[derive(Deserialize)]
pub struct PredictBody {
    text: String,
}

/// Query options for POST /predict.
#[derive(Deserialize)]
pub struct PredictOptions {
    #[serde(default = "default_include_rationale")]
    include_rationale: bool,
    #[serde(default)]
    redact_flagged: bool,
    #[serde(default = "default_threshold")]
    threshold: f64,
    #[serde(default = "default_top_k")]
    top_k: usize,
    #[serde(default)]
    redaction_mode: RedactionMode,
}

fn default_include_rationale() -> bool {
    true
}

fn default_threshold() -> f64 {
    0.5
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// POST /predict — classify one text snippet.
pub async fn predict(
    State(state): State<AppState>,
    Query(options): Query<PredictOptions>,
    Json(body): Json<PredictBody>,
) -> impl IntoResponse {
    let request = match PredictRequest::new(
        body.text,
        options.include_rationale,
        options.redact_flagged,
        options.threshold,
        options.top_k,
        options.redaction_mode,
    ) {
        Ok(req) => req,
        Err(e) => return api_error(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()),
    };

    match state.predictor.predict(&request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            error!("prediction failed: {e:#}");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "prediction failed")
        }
    }
}

/// GET /healthz — liveness plus the loaded model version.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "model_version": state.predictor.model_version(),
        })),
    )
}
