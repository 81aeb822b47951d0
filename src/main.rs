use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use cinder::classify::{PredictRequest, Predictor, RedactionMode, DEFAULT_TOP_K};
use cinder::config::{Config, ScorerBackend};
use cinder::model::{LinearScorer, PerspectiveScorer, Scorer};

/// Cinder: toxicity classification API.
///
/// Classifies text as toxic or non-toxic, reports the substrings that drove
/// the decision, and can return a redacted copy of the input.
#[derive(Parser)]
#[command(name = "cinder", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Classify a single text snippet from the command line
    Predict {
        /// The text to classify
        text: String,

        /// Toxicity probability cutoff for the toxic label
        #[arg(long, default_value = "0.5")]
        threshold: f64,

        /// Skip rationale span extraction
        #[arg(long)]
        no_rationale: bool,

        /// Also produce a redacted copy of the input
        #[arg(long)]
        redact: bool,

        /// Redaction mode: token or mask
        #[arg(long, default_value = "token")]
        mode: String,

        /// Maximum number of rationale spans to report
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },

    /// Show the configured scorer backend and model details
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinder=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            config.require_scorer()?;
            let scorer = build_scorer(&config)?;
            let predictor = Arc::new(Predictor::new(scorer));
            info!("serving with model version {}", predictor.model_version());
            cinder::web::run_server(&config, predictor, port, &bind).await?;
        }

        Commands::Predict {
            text,
            threshold,
            no_rationale,
            redact,
            mode,
            top_k,
        } => {
            let config = Config::load()?;
            config.require_scorer()?;
            let scorer = build_scorer(&config)?;
            let predictor = Predictor::new(scorer);

            let mode = match mode.as_str() {
                "token" => RedactionMode::Token,
                "mask" => RedactionMode::Mask,
                other => anyhow::bail!("unknown redaction mode {other:?}, expected token or mask"),
            };

            let request =
                PredictRequest::new(text.clone(), !no_rationale, redact, threshold, top_k, mode)?;
            let result = predictor.predict(&request).await?;
            cinder::output::display_prediction(&text, &result);
        }

        Commands::Status => {
            let config = Config::load()?;
            match config.scorer_backend {
                ScorerBackend::Linear => {
                    println!("Backend:     linear (local)");
                    println!("Model path:  {}", config.model_path.display());
                    match LinearScorer::load(&config.model_path) {
                        Ok(scorer) => {
                            let model = scorer.model();
                            println!("Version:     {}", model.version);
                            println!("Vocabulary:  {} terms", model.vocabulary.len());
                            println!("Trained at:  {}", model.trained_at.to_rfc3339());
                        }
                        Err(e) => {
                            println!("{}", format!("Model not loadable: {e:#}").red());
                        }
                    }
                }
                ScorerBackend::Perspective => {
                    println!("Backend:     perspective (remote)");
                    let key_state = if config.perspective_api_key.is_empty() {
                        "missing".red()
                    } else {
                        "set".green()
                    };
                    println!("API key:     {key_state}");
                }
            }
        }
    }

    Ok(())
}

/// Construct the configured scorer backend.
fn build_scorer(config: &Config) -> Result<Arc<dyn Scorer>> {
    match config.scorer_backend {
        ScorerBackend::Linear => Ok(Arc::new(LinearScorer::load(&config.model_path)?)),
        ScorerBackend::Perspective => {
            config.require_perspective()?;
            Ok(Arc::new(PerspectiveScorer::new(
                config.perspective_api_key.clone(),
            )))
        }
    }
}
