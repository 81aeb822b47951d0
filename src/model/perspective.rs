// Google Perspective API scorer backend.
//
// Perspective returns a per-attribute probability rather than a class
// distribution, so this adapter maps the TOXICITY summary score p to
// {toxic: p, non_toxic: 1 - p}. Free tier is rate-limited to ~1 QPS.
//
// API docs: https://developers.perspectiveapi.com/s/about-the-api-methods

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::ScoreDistribution;
use crate::output::truncate_chars;

use super::rate_limiter::RateLimiter;
use super::traits::Scorer;

/// Perspective API toxicity scorer.
pub struct PerspectiveScorer {
    client: Client,
    api_key: String,
    rate_limiter: RateLimiter,
}

impl PerspectiveScorer {
    /// Create a scorer with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            // Perspective free tier: 1 query per second
            rate_limiter: RateLimiter::new(1.0),
        }
    }
}

#[async_trait]
impl Scorer for PerspectiveScorer {
    async fn score(&self, text: &str) -> Result<ScoreDistribution> {
        self.rate_limiter.acquire().await;

        let url = format!(
            "https://commentanalyzer.googleapis.com/v1alpha1/comments:analyze?key={}",
            self.api_key
        );

        let request = AnalyzeRequest {
            comment: Comment {
                text: text.to_string(),
            },
            requested_attributes: RequestedAttributes {
                toxicity: AttributeConfig {},
            },
            languages: vec!["en".to_string()],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("failed to call Perspective API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Perspective API returned {status}: {body}");
        }

        let result: AnalyzeResponse = response
            .json()
            .await
            .context("failed to parse Perspective API response")?;

        let toxic = result
            .attribute_scores
            .get("TOXICITY")
            .map(|score| score.summary_score.value)
            .context("Perspective response missing TOXICITY attribute")?;

        debug!(
            toxic,
            text_preview = %truncate_chars(text, 50),
            "Perspective scored text"
        );

        Ok(ScoreDistribution {
            non_toxic: 1.0 - toxic,
            toxic,
        })
    }

    fn model_version(&self) -> String {
        "perspective-v1alpha1".to_string()
    }
}

// --- Perspective API request/response types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    comment: Comment,
    requested_attributes: RequestedAttributes,
    languages: Vec<String>,
}

#[derive(Serialize)]
struct Comment {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RequestedAttributes {
    toxicity: AttributeConfig,
}

#[derive(Serialize)]
struct AttributeConfig {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    attribute_scores: std::collections::HashMap<String, AttributeScore>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeScore {
    summary_score: SummaryScore,
}

#[derive(Deserialize)]
struct SummaryScore {
    value: f64,
}
