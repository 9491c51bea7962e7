//! Pointer input forwarding for the region canvas.
//!
//! egui reports absolute positions; the selector works in coordinates
//! relative to the canvas origin. Press starts a drag only on the canvas,
//! while release is taken from global pointer state so a drag that ends
//! outside the canvas still completes.

use crate::geometry::{RegionOfInterest, ScreenPoint};
use crate::region::RegionSelector;
use eframe::egui;

/// Result of processing pointer input for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEvent {
    /// User started a new selection drag.
    Started,
    /// User is actively dragging.
    Dragging,
    /// User completed a drag that produced a new region.
    Completed(RegionOfInterest),
    /// User released without spanning both axes; the region is unchanged.
    Unchanged,
    /// No selection event occurred.
    None,
}

/// Converts an absolute egui position into a canvas-relative point.
pub fn to_screen_point(canvas: egui::Rect, pos: egui::Pos2) -> ScreenPoint {
    ScreenPoint::new(pos.x - canvas.min.x, pos.y - canvas.min.y)
}

/// Feeds this frame's pointer state into `selector`.
///
/// # Arguments
/// * `ui` - The ui the canvas was allocated in
/// * `canvas` - Absolute rectangle of the canvas
/// * `selector` - The session's selector
pub fn process_pointer_input(
    ui: &egui::Ui,
    canvas: egui::Rect,
    selector: &mut RegionSelector,
) -> SelectionEvent {
    let (pressed, down, released, pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
        )
    });

    let mut event = SelectionEvent::None;

    if pressed {
        if let Some(p) = pos {
            selector.begin_drag(to_screen_point(canvas, p));
            if selector.is_dragging() {
                event = SelectionEvent::Started;
            }
        }
    }

    if !selector.is_dragging() {
        return event;
    }

    if down {
        if let Some(p) = pos {
            selector.update_drag(to_screen_point(canvas, p));
        }
        if event == SelectionEvent::None {
            event = SelectionEvent::Dragging;
        }
    }

    // A release we never saw (focus loss) shows up as "not down" while dragging.
    if released || !down {
        event = match selector.end_drag() {
            Some(region) => SelectionEvent::Completed(region),
            None => SelectionEvent::Unchanged,
        };
    }

    event
}
