//! Edge-triggered autoscroll while dragging.
//!
//! When the dragging pointer sits in a band near the top or bottom of the
//! visible part of the list, a frame loop scrolls the list's scroll
//! container at a speed proportional to how deep the pointer is in the band.
//! Each frame is driven by the host's [`FrameScheduler`]; the loop itself is
//! plain state so tests can feed it discrete timestamps.

use log::{debug, trace};

use crate::geometry::{Rect, ScrollExtent, Size, intersect_rects};
use crate::host::{FrameHandle, FrameScheduler, ListSurface, ScrollTarget};

/// Portion of the list rectangle that is inside the viewport.
///
/// `None` when the list is entirely off-screen.
pub fn visible_bounds(list: Rect, viewport: Size) -> Option<Rect> {
    intersect_rects(list, Rect::from_size(viewport))
}

/// Signed scroll speed in pixels per second for a pointer at `y`.
///
/// Negative scrolls up, positive scrolls down, zero outside both zones. The
/// magnitude grows linearly from 0 at the inner edge of a zone to
/// `viewport_height` at its outer edge, and stays there beyond it.
pub fn scroll_speed(y: f64, bounds: Option<Rect>, viewport_height: f64, zone_height: f64) -> f64 {
    let Some(bounds) = bounds else {
        return 0.0;
    };
    if zone_height <= 0.0 {
        return 0.0;
    }

    let top_boundary = bounds.top() + zone_height;
    if y < top_boundary {
        let ratio = (top_boundary - y).min(zone_height) / zone_height;
        return -ratio * viewport_height;
    }

    let bottom_boundary = bounds.bottom() - zone_height;
    if y > bottom_boundary {
        let ratio = (y - bottom_boundary).min(zone_height) / zone_height;
        return ratio * viewport_height;
    }

    0.0
}

/// Pick the box to scroll.
///
/// A list taller than its scrollable ancestor's client area scrolls that
/// ancestor; a list that fits (e.g. inside a flex parent) scrolls the document.
pub fn resolve_target(content_height: f64, ancestor: Option<ScrollExtent>) -> ScrollTarget {
    match ancestor {
        Some(extent) if content_height > extent.client_height => ScrollTarget::Ancestor,
        _ => ScrollTarget::Document,
    }
}

/// Outcome of delivering one frame to [`Autoscroll::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// Not the frame we scheduled; nothing happened.
    Stale,
    /// First frame of a loop: timestamp recorded, next frame requested.
    Baseline,
    /// Content moved by `delta`. The caller re-resolves the item under the
    /// pointer and then calls [`Autoscroll::resume`].
    Scrolled { target: ScrollTarget, delta: f64 },
}

/// Frame loop state. Inactive while `speed` is zero.
#[derive(Debug, Default)]
pub struct Autoscroll {
    speed: f64,
    last_frame: Option<f64>,
    frame: Option<FrameHandle>,
}

impl Autoscroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current speed in px/s.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Whether a frame is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Set the speed, starting or stopping the loop as needed.
    ///
    /// A loop started here always begins with a fresh baseline frame.
    pub fn set_speed<S>(&mut self, speed: f64, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        if speed == 0.0 || !speed.is_finite() {
            self.stop(scheduler);
            return;
        }

        self.speed = speed;
        if self.frame.is_none() {
            debug!("Autoscroll starting at {:.1}px/s", speed);
            self.last_frame = None;
            self.frame = Some(scheduler.request_frame());
        }
    }

    /// Cancel any scheduled frame and reset. Safe to call when idle.
    pub fn stop<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        if let Some(handle) = self.frame.take() {
            debug!("Autoscroll stopped");
            scheduler.cancel_frame(handle);
        }
        self.speed = 0.0;
        self.last_frame = None;
    }

    /// Run the frame identified by `handle` at `timestamp` milliseconds.
    pub fn step<H>(&mut self, handle: FrameHandle, timestamp: f64, host: &mut H) -> FrameStep
    where
        H: ListSurface + FrameScheduler + ?Sized,
    {
        if self.frame != Some(handle) {
            trace!("Ignoring stale frame {:?}", handle);
            return FrameStep::Stale;
        }
        self.frame = None;

        let Some(last) = self.last_frame.replace(timestamp) else {
            self.resume(host);
            return FrameStep::Baseline;
        };

        let elapsed = ((timestamp - last) / 1000.0).max(0.0);
        let target = resolve_target(host.content_height(), host.ancestor_scroll());
        let delta = host.scroll_extent(target).clamp_delta(self.speed * elapsed);
        if delta != 0.0 {
            host.scroll_by(target, delta);
        }
        trace!(
            "Autoscroll frame: {:.1}ms elapsed, scrolled {:?} by {:.2}px",
            elapsed * 1000.0,
            target,
            delta
        );

        FrameStep::Scrolled { target, delta }
    }

    /// Schedule the next frame unless the loop should end.
    ///
    /// The loop ends when the speed is zero, the scroll target has reached
    /// the extent it is moving toward, or the list left the viewport.
    pub fn resume<H>(&mut self, host: &mut H)
    where
        H: ListSurface + FrameScheduler + ?Sized,
    {
        if self.speed == 0.0 {
            self.stop(host);
            return;
        }

        let target = resolve_target(host.content_height(), host.ancestor_scroll());
        let extent = host.scroll_extent(target);
        let at_extent = if self.speed < 0.0 {
            extent.at_top()
        } else {
            extent.at_bottom()
        };
        if at_extent {
            debug!("Autoscroll reached {:?} extent", target);
            self.stop(host);
            return;
        }

        if visible_bounds(host.list_rect(), host.viewport_size()).is_none() {
            debug!("Autoscroll: list left the viewport");
            self.stop(host);
            return;
        }

        self.frame = Some(host.request_frame());
    }
}
