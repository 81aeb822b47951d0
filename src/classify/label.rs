// Label decision — the threshold cut over the score distribution.
//
// Kept separate from the orchestrator so the comparison semantics (inclusive
// at the threshold) live in exactly one place.

use super::types::{Label, ScoreDistribution};

/// Decide the label for a distribution under the caller's threshold.
///
/// `Toxic` iff `scores.toxic >= threshold` — equality resolves to toxic.
/// The caller's confidence is `scores.for_label(label)`, which under a
/// non-0.5 threshold may be lower than the other class's probability. That
/// is intentional: confidence reflects the probability of the label the
/// caller's threshold selected.
pub fn choose_label(scores: &ScoreDistribution, threshold: f64) -> Label {
    if scores.toxic >= threshold {
        Label::Toxic
    } else {
        Label::NonToxic
    }
}
