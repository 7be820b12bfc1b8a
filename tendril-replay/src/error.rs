//! Replay error types

use thiserror::Error;

use tendril::ConfigError;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),

    /// A step refers to an item the list does not contain.
    #[error("Step {step}: unknown item {item}")]
    UnknownItem { step: usize, item: String },
}
