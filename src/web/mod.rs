// Web server — Axum transport layer for the prediction pipeline.
//
// Two routes: POST /predict runs the pipeline, GET /healthz reports liveness
// and the model version. CORS is open to the configured frontend origins
// (localhost:3000 by default) with credentials, matching what the dashboard
// dev server sends.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::classify::Predictor;
use crate::config::Config;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    config: &Config,
    predictor: Arc<Predictor>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let state = AppState { predictor };
    let app = build_router(state, &config.cors_origins);

    let addr = format!("{bind}:{port}");
    info!("cinder API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router. Public so integration tests can drive it with
/// `tower::ServiceExt::oneshot` instead of binding a socket.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/healthz", get(handlers::health))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_credentials(true)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
