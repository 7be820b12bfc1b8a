//! Selection engine configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default height of the top and bottom autoscroll zones, in logical pixels.
pub const DEFAULT_ZONE_HEIGHT: f64 = 80.0;

/// Default minimum rightward travel for the enter-edit-mode swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 400.0;

/// Tuning for drag selection, autoscroll and swipe detection.
///
/// # Example
///
/// ```
/// use tendril::SelectionConfig;
///
/// let config = SelectionConfig::default()
///     .with_zone_height(60.0)
///     .with_swipe_threshold(300.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Height of the band at the top and bottom of the visible list bounds
    /// where a dragging pointer triggers autoscroll.
    ///
    /// Default: 80px
    pub zone_height: f64,

    /// Minimum horizontal travel of a rightward swipe.
    ///
    /// Default: 400px
    pub swipe_threshold: f64,

    /// Whether dragging into a zone scrolls at all.
    ///
    /// Default: true
    pub autoscroll: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            zone_height: DEFAULT_ZONE_HEIGHT,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            autoscroll: true,
        }
    }
}

impl SelectionConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the autoscroll zone height.
    pub fn with_zone_height(mut self, height: f64) -> Self {
        self.zone_height = height;
        self
    }

    /// Sets the swipe threshold.
    pub fn with_swipe_threshold(mut self, threshold: f64) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    /// Never scroll while dragging.
    pub fn without_autoscroll(mut self) -> Self {
        self.autoscroll = false;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.zone_height.is_finite() && self.zone_height > 0.0) {
            return Err(ConfigError::NonPositiveZoneHeight(self.zone_height));
        }
        if !(self.swipe_threshold.is_finite() && self.swipe_threshold > 0.0) {
            return Err(ConfigError::NonPositiveSwipeThreshold(self.swipe_threshold));
        }
        Ok(())
    }
}
