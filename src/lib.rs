// Cinder: toxicity classification with rationale spans and redaction.
//
// This is the library root. Each module corresponds to a major subsystem:
// the prediction pipeline, the scorer backends it consumes, and the
// transport/output collaborators around it.

pub mod classify;
pub mod config;
pub mod model;
pub mod output;
pub mod web;
