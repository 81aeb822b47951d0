// Scorer trait — the swap-ready abstraction over trained classifiers.
//
// The pipeline treats the model as an opaque capability: text in, class
// distribution out. The default implementation is a local linear model loaded
// from disk; the Perspective API is available as a remote backend. Swapping
// backends never touches the pipeline.

use anyhow::Result;
use async_trait::async_trait;

use crate::classify::ScoreDistribution;

/// Trait for scoring text toxicity. Async because remote backends require
/// HTTP calls; the local backend resolves immediately.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Produce a probability distribution over {non_toxic, toxic} for one text.
    async fn score(&self, text: &str) -> Result<ScoreDistribution>;

    /// Identifies the model behind this scorer, surfaced by the health endpoint.
    fn model_version(&self) -> String;
}
