// File: crates/bubble-core/src/error.rs
// Summary: Typed errors for configuration, extension wiring and scene lookups.

use thiserror::Error;

use crate::types::NodeId;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("extension '{0}' is already installed on this chart")]
    DuplicateExtension(String),
    #[error("item '{text}' has a non-numeric count '{count}'")]
    InvalidCount { text: String, count: String },
    #[error("radius bounds inverted: min {min} > max {max}")]
    InvalidRadius { min: f64, max: f64 },
    #[error("chart has no items")]
    EmptyData,
    #[error("no bubble at index {0}")]
    UnknownNode(NodeId),
    #[error("invalid chart configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to read chart configuration: {0}")]
    Io(#[from] std::io::Error),
}
