//! Drag, click and shift-click selection.

mod manager;
mod session;

pub use manager::DragSelection;
pub use session::{DragMode, DragSession, IndexRange, PointerListeners, ShiftAnchor, ordered_range};
