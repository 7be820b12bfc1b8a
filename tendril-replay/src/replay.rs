//! Drive a `DragSelection` through a scenario timeline.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use tendril::{DragSelection, GestureRecognizer, SelectionStore};

use crate::error::ReplayError;
use crate::scenario::{Report, Scenario, Step};
use crate::sim::SimHost;

/// Run every step and report the final state.
pub fn run(scenario: Scenario) -> Result<Report, ReplayError> {
    scenario.config.validate()?;

    let host = SimHost::new(&scenario.list);
    let mut selection =
        DragSelection::with_config(SelectionStore::new(), host, scenario.config.clone());
    selection.set_items(scenario.list.items.clone());
    selection.set_editing(scenario.editing);

    let swiped = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&swiped);
    let mut swipe = GestureRecognizer::from_config(&scenario.config, move || {
        flag.store(true, Ordering::SeqCst);
    });

    let mut frames_delivered = 0;
    for (n, step) in scenario.steps.into_iter().enumerate() {
        debug!("Step {}: {:?}", n, step);
        match step {
            Step::Down { index, event } => {
                if index >= selection.items().len() {
                    return Err(ReplayError::UnknownItem {
                        step: n,
                        item: format!("#{index}"),
                    });
                }
                selection.pointer_down(index, &event);
            }
            Step::Move { event } => {
                selection.pointer_move(&event);
            }
            Step::Up { event } => {
                selection.pointer_up(&event);
            }
            Step::Cancel { event } => {
                selection.pointer_cancel(&event);
            }
            Step::Frame { at } => {
                if let Some(handle) = selection.host_mut().next_frame() {
                    selection.on_frame(handle, at);
                    frames_delivered += 1;
                }
            }
            Step::Frames {
                start,
                interval,
                count,
            } => {
                for i in 0..count {
                    let Some(handle) = selection.host_mut().next_frame() else {
                        break;
                    };
                    selection.on_frame(handle, start + interval * i as f64);
                    frames_delivered += 1;
                }
            }
            Step::Key { index, key } => {
                selection.handle_key(index, key);
            }
            Step::Editing { enabled } => {
                selection.set_editing(enabled);
            }
            Step::Filter { keep } => {
                let known: HashSet<&String> = scenario.list.items.iter().collect();
                if let Some(unknown) = keep.iter().find(|k| !known.contains(k)) {
                    return Err(ReplayError::UnknownItem {
                        step: n,
                        item: unknown.clone(),
                    });
                }
                selection.host_mut().set_item_count(keep.len());
                selection.set_items(keep);
            }
            Step::Swipe { from, to } => {
                swipe.touch_start(from);
                let fired = swipe.touch_end(to, selection.is_editing());
                if fired && swiped.swap(false, Ordering::SeqCst) {
                    info!("Swipe entered edit mode");
                    selection.set_editing(true);
                }
            }
        }
    }

    debug!(
        "Replay finished with {} pointer(s) still captured",
        selection.host().captured().len()
    );

    let snapshot = selection.selection();
    let selected = selection
        .items()
        .iter()
        .filter(|key| snapshot.contains(*key))
        .cloned()
        .collect();

    Ok(Report {
        selected,
        editing: selection.is_editing(),
        document_scroll_top: selection.host().document_scroll_top(),
        container_scroll_top: selection.host().container_scroll_top(),
        frames_delivered,
    })
}
