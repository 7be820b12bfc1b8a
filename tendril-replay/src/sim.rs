//! Simulated host built from a scenario's list layout.

use std::collections::{HashSet, VecDeque};

use log::trace;

use tendril::{
    FrameHandle, FrameScheduler, ListSurface, Point, PointerCapture, PointerId, Rect,
    ScrollExtent, ScrollTarget, Size,
};

use crate::scenario::{ContainerLayout, ListLayout};

/// Fixed-height rows, optionally inside a scrollable container.
#[derive(Debug)]
pub struct SimHost {
    item_count: usize,
    row_height: f64,
    list_top: f64,
    viewport: Size,
    container: Option<ContainerLayout>,
    document_height: f64,
    document_scroll_top: f64,
    frames: VecDeque<FrameHandle>,
    next_frame: u64,
    captured: HashSet<PointerId>,
}

impl SimHost {
    pub fn new(layout: &ListLayout) -> Self {
        let content = layout.items.len() as f64 * layout.row_height;
        let document_height = layout.document_height.unwrap_or_else(|| match layout.container {
            Some(c) => c.top + c.client_height,
            None => layout.top + content,
        });
        Self {
            item_count: layout.items.len(),
            row_height: layout.row_height,
            list_top: layout.top,
            viewport: layout.viewport,
            container: layout.container,
            document_height,
            document_scroll_top: 0.0,
            frames: VecDeque::new(),
            next_frame: 1,
            captured: HashSet::new(),
        }
    }

    /// Items changed after a filter; geometry follows the new count.
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        if let Some(c) = self.container.as_mut() {
            let max = (self.list_top + count as f64 * self.row_height - c.client_height).max(0.0);
            c.scroll_top = c.scroll_top.min(max);
        }
    }

    pub fn document_scroll_top(&self) -> f64 {
        self.document_scroll_top
    }

    pub fn container_scroll_top(&self) -> Option<f64> {
        self.container.map(|c| c.scroll_top)
    }

    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        self.frames.pop_front()
    }

    pub fn captured(&self) -> &HashSet<PointerId> {
        &self.captured
    }

    fn container_origin(&self) -> f64 {
        match self.container {
            Some(c) => c.top - self.document_scroll_top - c.scroll_top,
            None => -self.document_scroll_top,
        }
    }
}

impl ListSurface for SimHost {
    fn hit_test(&self, point: Point) -> Option<usize> {
        if !Rect::from_size(self.viewport).contains(point) {
            return None;
        }
        if let Some(c) = self.container {
            let top = c.top - self.document_scroll_top;
            if point.y < top || point.y >= top + c.client_height {
                return None;
            }
        }
        let list = self.list_rect();
        if !list.contains(point) || self.row_height <= 0.0 {
            return None;
        }
        let index = ((point.y - list.y) / self.row_height).floor() as usize;
        (index < self.item_count).then_some(index)
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn list_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.container_origin() + self.list_top,
            self.viewport.width,
            self.content_height(),
        )
    }

    fn content_height(&self) -> f64 {
        self.item_count as f64 * self.row_height
    }

    fn ancestor_scroll(&self) -> Option<ScrollExtent> {
        self.container.map(|c| {
            ScrollExtent::new(
                c.scroll_top,
                self.list_top + self.content_height(),
                c.client_height,
            )
        })
    }

    fn document_scroll(&self) -> ScrollExtent {
        ScrollExtent::new(
            self.document_scroll_top,
            self.document_height,
            self.viewport.height,
        )
    }

    fn scroll_by(&mut self, target: ScrollTarget, delta: f64) {
        let extent = self.scroll_extent(target);
        let next = (extent.scroll_top + delta).clamp(0.0, extent.max_scroll_top());
        trace!("Sim scroll {:?} to {:.2}", target, next);
        match (target, self.container.as_mut()) {
            (ScrollTarget::Ancestor, Some(c)) => c.scroll_top = next,
            _ => self.document_scroll_top = next,
        }
    }
}

impl FrameScheduler for SimHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_frame);
        self.next_frame += 1;
        self.frames.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
    }
}

impl PointerCapture for SimHost {
    fn attach_pointer_listeners(&mut self, pointer: PointerId) {
        self.captured.insert(pointer);
    }

    fn detach_pointer_listeners(&mut self, pointer: PointerId) {
        self.captured.remove(&pointer);
    }
}
