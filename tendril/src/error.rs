//! Error types

use thiserror::Error;

/// Invalid [`SelectionConfig`](crate::SelectionConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Autoscroll zones must have a positive, finite height.
    #[error("autoscroll zone height must be positive and finite, got {0}")]
    NonPositiveZoneHeight(f64),

    /// Swipes must travel a positive, finite distance to count.
    #[error("swipe threshold must be positive and finite, got {0}")]
    NonPositiveSwipeThreshold(f64),
}
