//! State of one in-progress pointer interaction.

use std::sync::Arc;

use log::debug;

use crate::events::PointerId;
use crate::host::PointerCapture;
use crate::store::{ItemKey, SelectionSet};

/// Whether a drag adds or removes the items it passes over.
///
/// Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Select,
    Unselect,
}

/// Inclusive index range `[start, end]` with `start <= end`.
pub type IndexRange = (usize, usize);

/// Order two indices into an inclusive range.
pub fn ordered_range(a: usize, b: usize) -> IndexRange {
    (a.min(b), a.max(b))
}

/// Window-level pointer listeners owned by a session.
///
/// Attached when the session starts and detached exactly once by
/// [`dispose`](Self::dispose), whichever way the session ends.
#[derive(Debug)]
pub struct PointerListeners {
    pointer: Option<PointerId>,
}

impl PointerListeners {
    pub fn attach<C>(capture: &mut C, pointer: PointerId) -> Self
    where
        C: PointerCapture + ?Sized,
    {
        capture.attach_pointer_listeners(pointer);
        Self {
            pointer: Some(pointer),
        }
    }

    /// Detach the listeners. Idempotent.
    pub fn dispose<C>(&mut self, capture: &mut C)
    where
        C: PointerCapture + ?Sized,
    {
        if let Some(pointer) = self.pointer.take() {
            capture.detach_pointer_listeners(pointer);
        }
    }
}

/// One click, drag or shift-click, from pointer-down to release.
#[derive(Debug)]
pub struct DragSession<K> {
    /// Pointer that owns the session. Events from any other pointer are ignored.
    pub pointer_id: PointerId,
    /// Index the range is measured from.
    pub initial_index: usize,
    pub mode: DragMode,
    /// Selection the range is applied on top of.
    pub original_selection: Arc<SelectionSet<K>>,
    /// Range most recently written to the store.
    pub active_range: IndexRange,
    /// Item index seen by the latest move or autoscroll frame.
    pub last_event_index: usize,
    pub(crate) listeners: PointerListeners,
}

impl<K: ItemKey> DragSession<K> {
    pub(crate) fn new(
        pointer_id: PointerId,
        initial_index: usize,
        mode: DragMode,
        original_selection: Arc<SelectionSet<K>>,
        listeners: PointerListeners,
    ) -> Self {
        debug!(
            "Drag session started by {} at index {} ({:?})",
            pointer_id, initial_index, mode
        );
        Self {
            pointer_id,
            initial_index,
            mode,
            original_selection,
            active_range: (initial_index, initial_index),
            last_event_index: initial_index,
            listeners,
        }
    }

    /// Selection implied by `range`: the original selection with every item
    /// in range added (`Select`) or removed (`Unselect`).
    ///
    /// Indices past the end of `items` are skipped.
    pub fn selection_for(&self, range: IndexRange, items: &[K]) -> SelectionSet<K> {
        let mut next = SelectionSet::clone(&self.original_selection);
        let (start, end) = range;
        let in_range = items.iter().skip(start).take(end.saturating_sub(start) + 1);
        match self.mode {
            DragMode::Select => next.extend(in_range.cloned()),
            DragMode::Unselect => {
                for key in in_range {
                    next.remove(key);
                }
            }
        }
        next
    }
}

/// Index of the last plain click, used by shift-click range extension.
#[derive(Debug, Clone)]
pub struct ShiftAnchor<K> {
    pub index: usize,
    /// Selection captured by the first shift-click from this anchor. Later
    /// shift-clicks rebuild from it so the range can contract again.
    pub base: Option<Arc<SelectionSet<K>>>,
    /// Selection left in the store by the last shift session.
    pub written: Option<Arc<SelectionSet<K>>>,
}

impl<K> ShiftAnchor<K> {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            base: None,
            written: None,
        }
    }

    /// Selection a new shift-click applies its range on top of.
    ///
    /// The cached base is reused only while the store still holds exactly
    /// what the previous shift session wrote. Any other change in between
    /// rebases on `current`.
    pub fn rebase(&mut self, current: &Arc<SelectionSet<K>>) -> Arc<SelectionSet<K>> {
        let untouched = self
            .written
            .as_ref()
            .is_some_and(|written| Arc::ptr_eq(written, current));
        match &self.base {
            Some(base) if untouched => Arc::clone(base),
            _ => {
                self.base = Some(Arc::clone(current));
                Arc::clone(current)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(mode: DragMode, original: &[&'static str]) -> DragSession<&'static str> {
        DragSession {
            pointer_id: PointerId(1),
            initial_index: 1,
            mode,
            original_selection: Arc::new(original.iter().copied().collect()),
            active_range: (1, 1),
            last_event_index: 1,
            listeners: PointerListeners { pointer: None },
        }
    }

    const ITEMS: [&str; 5] = ["aloe", "basil", "cactus", "dill", "fern"];

    #[test]
    fn select_range_adds_to_original() {
        let s = session(DragMode::Select, &["fern"]);
        let next = s.selection_for((1, 3), &ITEMS);
        let expected: SelectionSet<_> = ["basil", "cactus", "dill", "fern"].into_iter().collect();
        assert_eq!(next, expected);
    }

    #[test]
    fn unselect_range_removes_from_original() {
        let s = session(DragMode::Unselect, &["aloe", "basil", "cactus"]);
        let next = s.selection_for((1, 4), &ITEMS);
        let expected: SelectionSet<_> = ["aloe"].into_iter().collect();
        assert_eq!(next, expected);
    }

    #[test]
    fn range_past_end_is_truncated() {
        let s = session(DragMode::Select, &[]);
        assert_eq!(s.selection_for((3, 9), &ITEMS).len(), 2);
    }

    #[test]
    fn anchor_rebases_after_outside_change() {
        let mut anchor: ShiftAnchor<&str> = ShiftAnchor::new(0);
        let first = Arc::new(SelectionSet::from(["aloe"]));
        assert!(Arc::ptr_eq(&anchor.rebase(&first), &first));

        let written = Arc::new(SelectionSet::from(["aloe", "basil"]));
        anchor.written = Some(Arc::clone(&written));
        assert!(Arc::ptr_eq(&anchor.rebase(&written), &first));

        let cleared = Arc::new(SelectionSet::new());
        assert!(Arc::ptr_eq(&anchor.rebase(&cleared), &cleared));
    }

    #[test]
    fn ordered_range_sorts() {
        assert_eq!(ordered_range(4, 2), (2, 4));
        assert_eq!(ordered_range(2, 2), (2, 2));
    }
}
