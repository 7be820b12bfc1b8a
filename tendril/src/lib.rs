//! Multi-item selection engine for list views in edit mode.
//!
//! - [`SelectionStore`] holds the selected keys and notifies subscribers.
//! - [`DragSelection`] turns pointer input into clicks, drag ranges and
//!   shift-click ranges, and drives [`Autoscroll`] near the list edges.
//! - [`GestureRecognizer`] detects the rightward swipe that enters edit mode.
//!
//! The host view supplies geometry, scrolling, frames and pointer capture
//! through the traits in [`host`].

pub mod autoscroll;
pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod store;

pub use autoscroll::{Autoscroll, FrameStep};
pub use config::SelectionConfig;
pub use drag::{DragMode, DragSelection, DragSession};
pub use error::ConfigError;
pub use events::{EventResult, Key, Modifiers, MouseButton, PointerEvent, PointerId, PointerKind};
pub use geometry::{Point, Rect, ScrollExtent, Size};
pub use gesture::GestureRecognizer;
pub use host::{FrameHandle, FrameScheduler, Host, ListSurface, PointerCapture, ScrollTarget};
pub use store::{ItemKey, SelectionSet, SelectionStore, Subscription};
