//! Interfaces the host view provides to the selection engine.
//!
//! The engine never touches a rendering toolkit directly. Everything it needs
//! from the outside world (where items are, how to scroll, when frames fire,
//! which pointers are being listened to) comes through these traits.

use crate::events::PointerId;
use crate::geometry::{Point, Rect, ScrollExtent, Size};

/// Which box an autoscroll frame moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    /// The list's immediate scrollable ancestor.
    Ancestor,
    /// The document / viewport.
    Document,
}

/// Geometry and scrolling of the rendered list.
pub trait ListSurface {
    /// Index of the item rendered at the given viewport coordinates.
    fn hit_test(&self, point: Point) -> Option<usize>;

    /// Size of the viewport.
    fn viewport_size(&self) -> Size;

    /// Bounding rectangle of the list in viewport coordinates.
    ///
    /// Not clamped: parts of it may lie outside the viewport.
    fn list_rect(&self) -> Rect;

    /// Rendered height of the list content.
    fn content_height(&self) -> f64;

    /// Scroll state of the list's immediate scrollable ancestor, if it has one.
    fn ancestor_scroll(&self) -> Option<ScrollExtent>;

    /// Scroll state of the document.
    fn document_scroll(&self) -> ScrollExtent;

    /// Scroll the target vertically by `delta` pixels.
    fn scroll_by(&mut self, target: ScrollTarget, delta: f64);

    /// Scroll state of a target. An absent ancestor reads as the document.
    fn scroll_extent(&self, target: ScrollTarget) -> ScrollExtent {
        match target {
            ScrollTarget::Ancestor => self
                .ancestor_scroll()
                .unwrap_or_else(|| self.document_scroll()),
            ScrollTarget::Document => self.document_scroll(),
        }
    }
}

/// Token identifying one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Platform frame scheduler.
///
/// `request_frame` asks for one callback; the host later delivers it by
/// calling [`DragSelection::on_frame`](crate::DragSelection::on_frame) with
/// the returned handle and the frame timestamp in milliseconds.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Window-level pointer listeners held for the lifetime of a drag.
pub trait PointerCapture {
    /// Start delivering move/up/cancel events for this pointer.
    fn attach_pointer_listeners(&mut self, pointer: PointerId);
    /// Stop delivering them.
    fn detach_pointer_listeners(&mut self, pointer: PointerId);
}

/// Everything the drag manager needs from its host.
pub trait Host: ListSurface + FrameScheduler + PointerCapture {}

impl<T> Host for T where T: ListSurface + FrameScheduler + PointerCapture {}
