// Router-level tests — drive the axum app with tower::ServiceExt::oneshot,
// no socket binding. A stub scorer keeps responses deterministic.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use cinder::classify::{Predictor, ScoreDistribution};
use cinder::model::Scorer;
use cinder::web::{build_router, AppState};

struct StubScorer {
    toxic: f64,
}

#[async_trait]
impl Scorer for StubScorer {
    async fn score(&self, _text: &str) -> Result<ScoreDistribution> {
        Ok(ScoreDistribution {
            non_toxic: 1.0 - self.toxic,
            toxic: self.toxic,
        })
    }

    fn model_version(&self) -> String {
        "stub-0.0".to_string()
    }
}

fn app(toxic: f64) -> Router {
    let state = AppState {
        predictor: Arc::new(Predictor::new(Arc::new(StubScorer { toxic }))),
    };
    build_router(state, &["http://localhost:3000".to_string()])
}

fn post_predict(uri: &str, text: &str) -> Request<Body> {
    let body = serde_json::json!({ "text": text }).to_string();
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok_and_model_version() {
    let response = app(0.5)
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_version"], "stub-0.0");
}

#[tokio::test]
async fn predict_basic_shape() {
    let response = app(0.94)
        .oneshot(post_predict("/predict", "thank you"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["label"] == "toxic" || body["label"] == "non_toxic");
    assert!(body["confidence"].is_number());
    assert!(body["scores"]["toxic"].is_number());
    assert!(body["scores"]["non_toxic"].is_number());
    assert!(body["meta"]["latency_ms"].is_number());
}

#[tokio::test]
async fn predict_toxic_with_rationale_and_redaction() {
    let response = app(0.94)
        .oneshot(post_predict(
            "/predict?include_rationale=true&redact_flagged=true",
            "You are an idiot!",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["label"], "toxic");
    assert_eq!(body["scores"]["toxic"], 0.94);

    let rationale = body["rationale"].as_array().unwrap();
    assert_eq!(rationale.len(), 1);
    assert_eq!(rationale[0]["span"], "idiot");
    assert_eq!(rationale[0]["start"], 11);
    assert_eq!(rationale[0]["end"], 16);
    assert_eq!(rationale[0]["weight"], 1.0);

    assert_eq!(body["redacted_text"], "You are an [REDACTED]!");
    assert_eq!(body["meta"]["threshold_used"], 0.5);
}

#[tokio::test]
async fn predict_rationale_excluded_when_disabled() {
    let response = app(0.94)
        .oneshot(post_predict(
            "/predict?include_rationale=false",
            "You are an idiot!",
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    // Absent fields are omitted from the JSON, not null-filled.
    assert!(body.get("rationale").is_none());
    assert!(body.get("redacted_text").is_none());
}

#[tokio::test]
async fn predict_custom_threshold_is_echoed() {
    let response = app(0.6)
        .oneshot(post_predict("/predict?threshold=0.75", "whatever text"))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["label"], "non_toxic");
    assert_eq!(body["meta"]["threshold_used"], 0.75);
}

#[tokio::test]
async fn predict_mask_mode_via_query() {
    let response = app(0.94)
        .oneshot(post_predict(
            "/predict?redact_flagged=true&redaction_mode=mask",
            "You are an idiot!",
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["redacted_text"], "You are an *****!");
}

#[tokio::test]
async fn predict_empty_text_is_unprocessable() {
    let response = app(0.5)
        .oneshot(post_predict("/predict", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn predict_oversized_text_is_unprocessable() {
    let text = "a".repeat(5001);
    let response = app(0.5)
        .oneshot(post_predict("/predict", &text))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn predict_text_at_limit_is_accepted() {
    let text = "a".repeat(5000);
    let response = app(0.1)
        .oneshot(post_predict("/predict", &text))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn predict_bad_threshold_is_unprocessable() {
    let response = app(0.5)
        .oneshot(post_predict("/predict?threshold=1.5", "hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
