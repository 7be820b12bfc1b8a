//! Shared test host: a list of fixed-height rows, optionally inside a
//! scrollable ancestor, with a recorded frame queue and pointer capture.

#![allow(dead_code)]

use std::collections::HashSet;

use tendril::{
    DragSelection, FrameHandle, FrameScheduler, ListSurface, Point, PointerCapture, PointerEvent,
    PointerId, Rect, ScrollExtent, ScrollTarget, SelectionConfig, SelectionStore, Size,
};

pub const ROW_HEIGHT: f64 = 50.0;
pub const VIEWPORT: Size = Size {
    width: 400.0,
    height: 600.0,
};

/// Scroll container the list is rendered in.
#[derive(Debug, Clone, Copy)]
pub struct Ancestor {
    /// Top edge in document coordinates.
    pub top: f64,
    pub client_height: f64,
    pub scroll_top: f64,
}

#[derive(Debug)]
pub struct FakeHost {
    pub item_count: usize,
    /// Offset of the list's top inside its container (document or ancestor).
    pub list_offset: f64,
    pub ancestor: Option<Ancestor>,
    pub doc_scroll_top: f64,
    pub doc_height: f64,
    pub pending_frames: Vec<FrameHandle>,
    pub next_frame: u64,
    pub cancelled_frames: usize,
    pub attached: HashSet<PointerId>,
    pub attach_count: usize,
    pub detach_count: usize,
}

impl FakeHost {
    /// A list rendered directly in the document.
    pub fn in_document(item_count: usize) -> Self {
        let content = item_count as f64 * ROW_HEIGHT;
        Self {
            item_count,
            list_offset: 0.0,
            ancestor: None,
            doc_scroll_top: 0.0,
            doc_height: content.max(VIEWPORT.height),
            pending_frames: Vec::new(),
            next_frame: 1,
            cancelled_frames: 0,
            attached: HashSet::new(),
            attach_count: 0,
            detach_count: 0,
        }
    }

    /// A list inside a scroll container that fills the viewport.
    pub fn in_ancestor(item_count: usize, client_height: f64) -> Self {
        let mut host = Self::in_document(item_count);
        host.ancestor = Some(Ancestor {
            top: 0.0,
            client_height,
            scroll_top: 0.0,
        });
        host.doc_height = VIEWPORT.height;
        host
    }

    fn container_top(&self) -> f64 {
        match self.ancestor {
            Some(a) => a.top - self.doc_scroll_top - a.scroll_top,
            None => -self.doc_scroll_top,
        }
    }

    /// Center of row `index` in viewport coordinates.
    pub fn row_center(&self, index: usize) -> Point {
        let y = self.container_top() + self.list_offset + (index as f64 + 0.5) * ROW_HEIGHT;
        Point::new(100.0, y)
    }

    pub fn ancestor_scroll_top(&self) -> f64 {
        self.ancestor.map(|a| a.scroll_top).unwrap_or(0.0)
    }

    /// Pop the oldest pending frame.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        if self.pending_frames.is_empty() {
            None
        } else {
            Some(self.pending_frames.remove(0))
        }
    }
}

impl ListSurface for FakeHost {
    fn hit_test(&self, point: Point) -> Option<usize> {
        if !Rect::from_size(VIEWPORT).contains(point) {
            return None;
        }
        if let Some(a) = self.ancestor {
            let top = a.top - self.doc_scroll_top;
            if point.y < top || point.y >= top + a.client_height {
                return None;
            }
        }
        let list = self.list_rect();
        if !list.contains(point) {
            return None;
        }
        let index = ((point.y - list.y) / ROW_HEIGHT).floor() as usize;
        (index < self.item_count).then_some(index)
    }

    fn viewport_size(&self) -> Size {
        VIEWPORT
    }

    fn list_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.container_top() + self.list_offset,
            VIEWPORT.width,
            self.content_height(),
        )
    }

    fn content_height(&self) -> f64 {
        self.item_count as f64 * ROW_HEIGHT
    }

    fn ancestor_scroll(&self) -> Option<ScrollExtent> {
        self.ancestor.map(|a| {
            ScrollExtent::new(
                a.scroll_top,
                self.list_offset + self.content_height(),
                a.client_height,
            )
        })
    }

    fn document_scroll(&self) -> ScrollExtent {
        ScrollExtent::new(self.doc_scroll_top, self.doc_height, VIEWPORT.height)
    }

    fn scroll_by(&mut self, target: ScrollTarget, delta: f64) {
        let extent = self.scroll_extent(target);
        let next = (extent.scroll_top + delta).clamp(0.0, extent.max_scroll_top());
        match (target, self.ancestor.as_mut()) {
            (ScrollTarget::Ancestor, Some(a)) => a.scroll_top = next,
            _ => self.doc_scroll_top = next,
        }
    }
}

impl FrameScheduler for FakeHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_frame);
        self.next_frame += 1;
        self.pending_frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending_frames.len();
        self.pending_frames.retain(|h| *h != handle);
        if self.pending_frames.len() != before {
            self.cancelled_frames += 1;
        }
    }
}

impl PointerCapture for FakeHost {
    fn attach_pointer_listeners(&mut self, pointer: PointerId) {
        self.attached.insert(pointer);
        self.attach_count += 1;
    }

    fn detach_pointer_listeners(&mut self, pointer: PointerId) {
        self.attached.remove(&pointer);
        self.detach_count += 1;
    }
}

pub type Manager = DragSelection<String, FakeHost>;

pub fn keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("plant-{i}")).collect()
}

pub fn key(index: usize) -> String {
    format!("plant-{index}")
}

/// An editing manager over `plant-0..plant-{count}` rendered in `host`.
pub fn manager_with(host: FakeHost, config: SelectionConfig) -> Manager {
    let count = host.item_count;
    let mut manager = DragSelection::with_config(SelectionStore::new(), host, config);
    manager.set_items(keys(count));
    manager.set_editing(true);
    manager
}

/// An editing manager with autoscroll off, for pure selection tests.
pub fn manager(count: usize) -> Manager {
    manager_with(
        FakeHost::in_document(count),
        SelectionConfig::default().without_autoscroll(),
    )
}

/// Sorted selected indices, for readable assertions.
pub fn selected(manager: &Manager) -> Vec<usize> {
    let snapshot = manager.selection();
    let mut indices: Vec<usize> = manager
        .items()
        .iter()
        .enumerate()
        .filter(|(_, k)| snapshot.contains(*k))
        .map(|(i, _)| i)
        .collect();
    indices.sort_unstable();
    indices
}

/// Mouse event for pointer 1 at the center of a row.
pub fn at_row(manager: &Manager, index: usize) -> PointerEvent {
    let p = manager.host().row_center(index);
    PointerEvent::mouse(1, p.x, p.y)
}

pub fn press(manager: &mut Manager, index: usize) {
    let event = at_row(manager, index);
    manager.pointer_down(index, &event);
}

pub fn drag_to(manager: &mut Manager, index: usize) {
    let event = at_row(manager, index);
    manager.pointer_move(&event);
}

pub fn release(manager: &mut Manager) {
    let event = PointerEvent::mouse(1, 0.0, 0.0);
    manager.pointer_up(&event);
}

pub fn click(manager: &mut Manager, index: usize) {
    press(manager, index);
    release(manager);
}

/// Deliver the next pending frame at `timestamp`. Returns false if none.
pub fn run_frame(manager: &mut Manager, timestamp: f64) -> bool {
    match manager.host_mut().take_frame() {
        Some(handle) => {
            manager.on_frame(handle, timestamp);
            true
        }
        None => false,
    }
}
