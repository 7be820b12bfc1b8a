//! Pointer-driven multi-selection for list views in edit mode.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, trace};

use crate::autoscroll::{Autoscroll, FrameStep, scroll_speed, visible_bounds};
use crate::config::SelectionConfig;
use crate::events::{EventResult, Key, PointerEvent};
use crate::geometry::Point;
use crate::host::{FrameHandle, Host};
use crate::store::{ItemKey, SelectionSet, SelectionStore};

use super::session::{
    DragMode, DragSession, IndexRange, PointerListeners, ShiftAnchor, ordered_range,
};

/// Drag-selection state machine for one list instance.
///
/// Idle until a qualifying pointer-down on an item starts a [`DragSession`];
/// the session then follows that one pointer until it is released or
/// cancelled, rewriting the selection in `store` as the pointer crosses
/// items, and driving [`Autoscroll`] while the pointer is near the list's
/// top or bottom edge.
///
/// At most one session exists at a time. Everything the manager cannot act
/// on (other pointers, secondary buttons, unresolved hit-tests, input while
/// not editing) is ignored rather than reported.
#[derive(Debug)]
pub struct DragSelection<K: ItemKey, H: Host> {
    store: SelectionStore<K>,
    items: Vec<K>,
    editing: bool,
    config: SelectionConfig,
    host: H,
    session: Option<DragSession<K>>,
    shift_anchor: Option<ShiftAnchor<K>>,
    autoscroll: Autoscroll,
    last_pointer: Option<Point>,
}

impl<K: ItemKey, H: Host> DragSelection<K, H> {
    /// Create a manager with editing disabled and no items.
    pub fn new(store: SelectionStore<K>, host: H) -> Self {
        Self::with_config(store, host, SelectionConfig::default())
    }

    pub fn with_config(store: SelectionStore<K>, host: H, config: SelectionConfig) -> Self {
        Self {
            store,
            items: Vec::new(),
            editing: false,
            config,
            host,
            session: None,
            shift_anchor: None,
            autoscroll: Autoscroll::new(),
            last_pointer: None,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn store(&self) -> &SelectionStore<K> {
        &self.store
    }

    pub fn items(&self) -> &[K] {
        &self.items
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Whether a pointer interaction is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession<K>> {
        self.session.as_ref()
    }

    pub fn shift_anchor(&self) -> Option<usize> {
        self.shift_anchor.as_ref().map(|anchor| anchor.index)
    }

    /// Current autoscroll speed in px/s (0 when not scrolling).
    pub fn autoscroll_speed(&self) -> f64 {
        self.autoscroll.speed()
    }

    pub fn is_autoscrolling(&self) -> bool {
        self.autoscroll.is_running()
    }

    /// Current selection snapshot.
    pub fn selection(&self) -> Arc<SelectionSet<K>> {
        self.store.snapshot()
    }

    // -------------------------------------------------------------------------
    // External state changes
    // -------------------------------------------------------------------------

    /// Enable or disable editing. Disabling ends any session and forgets
    /// the shift anchor.
    pub fn set_editing(&mut self, editing: bool) {
        if self.editing == editing {
            return;
        }
        self.editing = editing;
        if !editing {
            self.end_session();
            self.shift_anchor = None;
        }
    }

    /// Replace the ordered item list.
    ///
    /// A list that differs from the current one ends any session, drops the
    /// shift anchor (its index may now point at another item) and unselects
    /// keys that are no longer present. Returns whether the list changed.
    pub fn set_items(&mut self, items: Vec<K>) -> bool {
        if items == self.items {
            return false;
        }

        self.end_session();
        self.shift_anchor = None;
        self.items = items;

        let present: HashSet<&K> = self.items.iter().collect();
        let pruned = self.store.retain(|key| present.contains(key));
        debug!(
            "Item list changed ({} items), stale selection pruned: {}",
            self.items.len(),
            pruned
        );
        true
    }

    /// Tear down for unmount. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.end_session();
        self.shift_anchor = None;
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// Pointer pressed on the item at `index`.
    pub fn pointer_down(&mut self, index: usize, event: &PointerEvent) -> EventResult {
        if !self.editing || index >= self.items.len() {
            return EventResult::Ignored;
        }
        if !event.is_primary_press() {
            trace!("Ignoring non-primary press from {}", event.pointer_id);
            return EventResult::Ignored;
        }
        if let Some(session) = &self.session {
            debug!(
                "Ignoring press from {} while {} owns the drag",
                event.pointer_id, session.pointer_id
            );
            return EventResult::Ignored;
        }

        self.last_pointer = Some(event.position);

        let anchored = self
            .shift_anchor
            .as_ref()
            .is_some_and(|anchor| anchor.index < self.items.len());
        if event.modifiers.shift && anchored {
            self.start_shift_session(index, event);
        } else {
            self.start_click_session(index, event);
        }
        EventResult::StartDrag
    }

    fn start_click_session(&mut self, index: usize, event: &PointerEvent) {
        let key = self.items[index].clone();
        let original = self.store.snapshot();
        let mode = if original.contains(&key) {
            DragMode::Unselect
        } else {
            DragMode::Select
        };

        self.store.toggle(key);
        self.shift_anchor = Some(ShiftAnchor::new(index));

        let listeners = PointerListeners::attach(&mut self.host, event.pointer_id);
        self.session = Some(DragSession::new(
            event.pointer_id,
            index,
            mode,
            original,
            listeners,
        ));
    }

    fn start_shift_session(&mut self, index: usize, event: &PointerEvent) {
        let current = self.store.snapshot();
        let Some(anchor) = self.shift_anchor.as_mut() else {
            return;
        };
        let anchor_index = anchor.index;
        let base = anchor.rebase(&current);
        let mode = if current.contains(&self.items[anchor_index]) {
            DragMode::Select
        } else {
            DragMode::Unselect
        };

        let listeners = PointerListeners::attach(&mut self.host, event.pointer_id);
        let mut session = DragSession::new(event.pointer_id, anchor_index, mode, base, listeners);
        let range = ordered_range(anchor_index, index);
        debug!("Shift-click applying range {:?} ({:?})", range, mode);
        self.store.replace(session.selection_for(range, &self.items));
        session.active_range = range;
        session.last_event_index = index;
        self.session = Some(session);
    }

    /// Pointer moved. Only the pointer owning the session is followed.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> EventResult {
        if !self.owns(event) {
            return EventResult::Ignored;
        }

        self.last_pointer = Some(event.position);
        if let Some(index) = self.host.hit_test(event.position) {
            self.resolve_index(index);
        }
        self.update_autoscroll(event.position.y);
        EventResult::Consumed
    }

    /// Pointer released.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> EventResult {
        if !self.owns(event) {
            return EventResult::Ignored;
        }

        if let Some(session) = &self.session {
            let index = session.initial_index;
            if self.shift_anchor.as_ref().map(|anchor| anchor.index) != Some(index) {
                self.shift_anchor = Some(ShiftAnchor::new(index));
            }
        }
        self.end_session();
        EventResult::Consumed
    }

    /// Pointer cancelled by the platform (e.g. touch turned into a scroll).
    pub fn pointer_cancel(&mut self, event: &PointerEvent) -> EventResult {
        if !self.owns(event) {
            return EventResult::Ignored;
        }
        self.end_session();
        EventResult::Consumed
    }

    fn owns(&self, event: &PointerEvent) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.pointer_id == event.pointer_id)
    }

    /// End the session: detach its listeners, forget the pointer position
    /// and cancel autoscroll. A no-op when idle.
    pub fn end_session(&mut self) -> bool {
        self.autoscroll.stop(&mut self.host);
        self.last_pointer = None;

        let Some(mut session) = self.session.take() else {
            return false;
        };
        session.listeners.dispose(&mut self.host);
        if let Some(anchor) = self.shift_anchor.as_mut()
            && anchor.base.is_some()
            && anchor.index == session.initial_index
        {
            anchor.written = Some(self.store.snapshot());
        }
        debug!(
            "Drag session by {} ended with range {:?}",
            session.pointer_id, session.active_range
        );
        true
    }

    // -------------------------------------------------------------------------
    // Keyboard input
    // -------------------------------------------------------------------------

    /// Toggle the item at `index` from the keyboard (Space or Enter).
    pub fn handle_key(&mut self, index: usize, key: Key) -> EventResult {
        if !self.editing || self.session.is_some() || index >= self.items.len() {
            return EventResult::Ignored;
        }
        match key {
            Key::Space | Key::Enter => {
                self.store.toggle(self.items[index].clone());
                self.shift_anchor = Some(ShiftAnchor::new(index));
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    // -------------------------------------------------------------------------
    // Range resolution and autoscroll
    // -------------------------------------------------------------------------

    /// Feed the item now under the pointer into the session's range.
    fn resolve_index(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.last_event_index == index {
            return;
        }
        session.last_event_index = index;

        let range: IndexRange = ordered_range(session.initial_index, index);
        if range == session.active_range {
            return;
        }
        trace!("Drag range {:?} -> {:?}", session.active_range, range);
        let next = session.selection_for(range, &self.items);
        session.active_range = range;
        self.store.replace(next);
    }

    fn update_autoscroll(&mut self, y: f64) {
        if !self.config.autoscroll {
            return;
        }
        let viewport = self.host.viewport_size();
        let bounds = visible_bounds(self.host.list_rect(), viewport);
        let speed = scroll_speed(y, bounds, viewport.height, self.config.zone_height);
        self.autoscroll.set_speed(speed, &mut self.host);
    }

    /// Deliver a frame previously requested from the host's scheduler.
    ///
    /// `timestamp` is in milliseconds. Frames that were cancelled or belong
    /// to an ended session are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp: f64) {
        if self.session.is_none() {
            return;
        }

        if let FrameStep::Scrolled { .. } = self.autoscroll.step(handle, timestamp, &mut self.host)
        {
            if let Some(point) = self.last_pointer
                && let Some(index) = self.host.hit_test(point)
            {
                self.resolve_index(index);
            }
            self.autoscroll.resume(&mut self.host);
        }
    }
}

impl<K: ItemKey, H: Host> Drop for DragSelection<K, H> {
    fn drop(&mut self) {
        self.dispose();
    }
}
