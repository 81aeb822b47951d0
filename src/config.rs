use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Which scorer backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum ScorerBackend {
    /// Local linear model (default) — no API key needed, no rate limits
    Linear,
    /// Google Perspective API — requires PERSPECTIVE_API_KEY, 1 QPS limit
    Perspective,
}

/// Default CORS origins for the local frontend dev server.
const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://0.0.0.0:3000",
];

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Which scorer to use (default: Linear)
    pub scorer_backend: ScorerBackend,
    /// Path to the linear model artifact
    pub model_path: PathBuf,
    pub perspective_api_key: String,
    /// Origins allowed by the CORS layer (CINDER_CORS_ORIGINS, comma-separated)
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let scorer_backend = match env::var("CINDER_SCORER").as_deref() {
            Ok("perspective") => ScorerBackend::Perspective,
            // "linear" or unset both default to the local model
            _ => ScorerBackend::Linear,
        };

        let model_path = env::var("CINDER_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./models/toxicity_model.json"));

        let cors_origins = match env::var("CINDER_CORS_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            scorer_backend,
            model_path,
            perspective_api_key: env::var("PERSPECTIVE_API_KEY").unwrap_or_default(),
            cors_origins,
        })
    }

    /// Check that the Perspective API key is configured.
    pub fn require_perspective(&self) -> Result<()> {
        if self.perspective_api_key.is_empty() {
            anyhow::bail!(
                "PERSPECTIVE_API_KEY not set. Add it to your .env file,\n\
                 or unset CINDER_SCORER to use the local linear model."
            );
        }
        Ok(())
    }

    /// Validate that the chosen scorer backend has what it needs.
    /// For Linear: the model file must exist. For Perspective: API key set.
    pub fn require_scorer(&self) -> Result<()> {
        match self.scorer_backend {
            ScorerBackend::Linear => {
                if !self.model_path.exists() {
                    anyhow::bail!(
                        "model file not found: {}\n\
                         Set CINDER_MODEL_PATH, or set CINDER_SCORER=perspective to use the Perspective API.",
                        self.model_path.display()
                    );
                }
                Ok(())
            }
            ScorerBackend::Perspective => self.require_perspective(),
        }
    }
}
