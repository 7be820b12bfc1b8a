//! Scenario file format.
//!
//! A scenario describes a rendered list and a timeline of input. Example:
//!
//! ```json
//! {
//!   "list": { "items": ["fern", "aloe", "basil"], "row_height": 50 },
//!   "steps": [
//!     { "type": "down", "index": 0, "event": { "pointer_id": 1, "position": { "x": 10, "y": 25 } } },
//!     { "type": "move", "event": { "pointer_id": 1, "position": { "x": 10, "y": 125 } } },
//!     { "type": "up", "event": { "pointer_id": 1, "position": { "x": 10, "y": 125 } } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use tendril::{Key, Point, PointerEvent, SelectionConfig, Size};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SelectionConfig,
    pub list: ListLayout,
    /// Whether the list starts in edit mode.
    #[serde(default = "default_editing")]
    pub editing: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_editing() -> bool {
    true
}

/// Geometry of the rendered list.
#[derive(Debug, Clone, Deserialize)]
pub struct ListLayout {
    pub items: Vec<String>,
    pub row_height: f64,
    /// Offset of the list inside its container.
    #[serde(default)]
    pub top: f64,
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    /// Scrollable ancestor. Without one the list lives in the document.
    #[serde(default)]
    pub container: Option<ContainerLayout>,
    /// Document height; defaults to whatever holds the list.
    #[serde(default)]
    pub document_height: Option<f64>,
}

fn default_viewport() -> Size {
    Size::new(400.0, 600.0)
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ContainerLayout {
    /// Top edge in document coordinates.
    #[serde(default)]
    pub top: f64,
    pub client_height: f64,
    #[serde(default)]
    pub scroll_top: f64,
}

/// One input on the timeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Down { index: usize, event: PointerEvent },
    Move { event: PointerEvent },
    Up { event: PointerEvent },
    Cancel { event: PointerEvent },
    /// Deliver the pending frame, if any, at `at` milliseconds.
    Frame { at: f64 },
    /// Deliver up to `count` frames starting at `start`, `interval` ms apart.
    Frames {
        start: f64,
        #[serde(default = "default_interval")]
        interval: f64,
        count: usize,
    },
    Key { index: usize, key: Key },
    Editing { enabled: bool },
    /// Re-render with only these items, in this order.
    Filter { keep: Vec<String> },
    Swipe { from: Point, to: Point },
}

fn default_interval() -> f64 {
    16.0
}

/// Final state printed after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Selected keys in list order.
    pub selected: Vec<String>,
    pub editing: bool,
    pub document_scroll_top: f64,
    pub container_scroll_top: Option<f64>,
    pub frames_delivered: usize,
}
