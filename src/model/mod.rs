// Scorer backends — trait-based abstraction for swappable providers.
//
// The Scorer trait defines the interface. LinearScorer (local TF-IDF +
// logistic regression artifact) is the default; PerspectiveScorer is a
// remote alternative. The pipeline never knows which one it holds.

pub mod linear;
pub mod perspective;
pub mod rate_limiter;
pub mod traits;

pub use linear::LinearScorer;
pub use perspective::PerspectiveScorer;
pub use traits::Scorer;
