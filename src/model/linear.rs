// Local linear model scorer: TF-IDF features + logistic regression.
//
// This scorer runs entirely on the local CPU — no API calls, no rate limits,
// no network dependency. The model file is a JSON artifact produced offline:
// a vocabulary of unigrams and bigrams, per-term IDF weights, one coefficient
// per term, and an intercept. Inference is count -> idf -> l2-normalize ->
// dot -> sigmoid, which mirrors the pipeline the artifact was trained with.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::classify::ScoreDistribution;
use crate::output::truncate_chars;

use super::traits::Scorer;

/// On-disk model artifact. Term indices in `vocabulary` index into `idf`
/// and `coefficients`; positive coefficients push toward toxic.
#[derive(Debug, Clone, Deserialize)]
pub struct ToxicityModel {
    pub version: String,
    pub trained_at: DateTime<Utc>,
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Longest n-gram in the vocabulary (1 = unigrams only, 2 = + bigrams).
    pub ngram_max: usize,
}

impl ToxicityModel {
    /// Check internal consistency: every vocabulary index must have an IDF
    /// weight and a coefficient.
    fn validate(&self) -> Result<()> {
        let n = self.vocabulary.len();
        if self.idf.len() != n || self.coefficients.len() != n {
            anyhow::bail!(
                "model file is inconsistent: {} vocabulary terms, {} idf weights, {} coefficients",
                n,
                self.idf.len(),
                self.coefficients.len()
            );
        }
        if let Some((term, &idx)) = self.vocabulary.iter().find(|&(_, &idx)| idx >= n) {
            anyhow::bail!("model file is inconsistent: term {term:?} has out-of-range index {idx}");
        }
        if !(1..=2).contains(&self.ngram_max) {
            anyhow::bail!("unsupported ngram_max {}, expected 1 or 2", self.ngram_max);
        }
        Ok(())
    }
}

/// Scorer backed by a [`ToxicityModel`] loaded from disk.
pub struct LinearScorer {
    model: ToxicityModel,
    token_pattern: Regex,
}

impl LinearScorer {
    /// Load and validate a model artifact from `path`.
    ///
    /// A missing or corrupt file is a fatal configuration error — the caller
    /// should refuse to start rather than serve fake scores.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).with_context(|| {
            format!(
                "model file not found or unreadable: {}\nSet CINDER_MODEL_PATH or restore models/toxicity_model.json",
                path.display()
            )
        })?;
        let model: ToxicityModel = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse model file {}", path.display()))?;
        Self::from_model(model)
    }

    /// Build a scorer from an already-deserialized model.
    pub fn from_model(model: ToxicityModel) -> Result<Self> {
        model.validate()?;
        // Word tokens: lowercase letters, digits, apostrophes. The input is
        // lowercased before matching, so this covers the ASCII word content.
        let token_pattern = Regex::new(r"[a-z0-9']+").context("invalid token pattern")?;
        debug!(
            version = %model.version,
            vocabulary = model.vocabulary.len(),
            "loaded linear toxicity model"
        );
        Ok(Self {
            model,
            token_pattern,
        })
    }

    pub fn model(&self) -> &ToxicityModel {
        &self.model
    }

    /// Lowercased unigram (and, when the model uses them, bigram) terms.
    fn terms(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&lower)
            .map(|m| m.as_str())
            .collect();

        let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        if self.model.ngram_max >= 2 {
            for pair in tokens.windows(2) {
                terms.push(format!("{} {}", pair[0], pair[1]));
            }
        }
        terms
    }

    /// Probability that `text` is toxic, per the linear model.
    fn toxic_probability(&self, text: &str) -> f64 {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.terms(text) {
            if let Some(&idx) = self.model.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        // TF-IDF with L2 normalization, then the logistic link.
        let weights: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.model.idf[idx]))
            .collect();
        let norm = weights
            .iter()
            .map(|(_, w)| w * w)
            .sum::<f64>()
            .sqrt();

        let mut z = self.model.intercept;
        if norm > 0.0 {
            for (idx, w) in weights {
                z += (w / norm) * self.model.coefficients[idx];
            }
        }
        sigmoid(z)
    }
}

#[async_trait]
impl Scorer for LinearScorer {
    async fn score(&self, text: &str) -> Result<ScoreDistribution> {
        let toxic = self.toxic_probability(text);
        debug!(
            toxic,
            text_preview = %truncate_chars(text, 50),
            "linear model scored text"
        );
        Ok(ScoreDistribution {
            non_toxic: 1.0 - toxic,
            toxic,
        })
    }

    fn model_version(&self) -> String {
        self.model.version.clone()
    }
}

/// Sigmoid activation: maps any real number to (0, 1).
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
