//! Swipe-to-edit gesture detection.

use std::fmt;

use log::debug;

use crate::config::SelectionConfig;
use crate::geometry::Point;

/// Fires a callback when a touch swipes far enough to the right while the
/// list is not in edit mode.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use tendril::{GestureRecognizer, Point};
///
/// let fired = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&fired);
/// let mut swipe = GestureRecognizer::new(400.0, move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// swipe.touch_start(Point::new(10.0, 200.0));
/// assert!(swipe.touch_end(Point::new(450.0, 220.0), false));
/// assert_eq!(fired.load(Ordering::SeqCst), 1);
/// ```
pub struct GestureRecognizer {
    threshold: f64,
    start: Option<Point>,
    on_enter_edit: Box<dyn FnMut() + Send>,
}

impl GestureRecognizer {
    pub fn new<F>(threshold: f64, on_enter_edit: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self {
            threshold,
            start: None,
            on_enter_edit: Box::new(on_enter_edit),
        }
    }

    /// Use the swipe threshold from a config.
    pub fn from_config<F>(config: &SelectionConfig, on_enter_edit: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self::new(config.swipe_threshold, on_enter_edit)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn touch_start(&mut self, point: Point) {
        self.start = Some(point);
    }

    /// Forget the tracked touch.
    pub fn touch_cancel(&mut self) {
        self.start = None;
    }

    /// Finish the touch. Returns whether the enter-edit callback fired.
    pub fn touch_end(&mut self, point: Point, editing: bool) -> bool {
        let Some(start) = self.start.take() else {
            return false;
        };
        if editing {
            return false;
        }

        let dx = point.x - start.x;
        let dy = point.y - start.y;
        if dx >= self.threshold && dx.abs() > dy.abs() {
            debug!("Swipe of {:.0}px enters edit mode", dx);
            (self.on_enter_edit)();
            return true;
        }
        false
    }
}

impl fmt::Debug for GestureRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("threshold", &self.threshold)
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}
