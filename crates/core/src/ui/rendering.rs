//! UI rendering helpers for the region canvas.
//!
//! This module contains the drawing functions for the canvas background,
//! the dimmed area outside the selection, and the selection border.

use crate::geometry::ScreenRect;
use eframe::egui;

/// Canvas background color.
pub const CANVAS_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(70, 70, 70);

/// Selection border color.
pub const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);

/// Heading text color.
pub const TITLE_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 255);

/// Places a canvas-relative rectangle at the canvas' absolute position.
pub fn to_egui_rect(canvas: egui::Rect, rect: ScreenRect) -> egui::Rect {
    egui::Rect::from_min_max(
        canvas.min + egui::vec2(rect.min.x, rect.min.y),
        canvas.min + egui::vec2(rect.max.x, rect.max.y),
    )
}

/// Fills the canvas with its background color.
pub fn draw_canvas_background(painter: &egui::Painter, canvas: egui::Rect) {
    painter.rect_filled(canvas, 0.0, CANVAS_BACKGROUND);
}

/// Dims the part of the canvas outside the selection.
///
/// # Arguments
/// * `painter` - The egui painter to draw with
/// * `canvas` - The full canvas rectangle
/// * `selection_rect` - The selected area to keep clear
/// * `alpha` - Darkness level (0-255, higher = darker)
pub fn draw_selection_overlay(
    painter: &egui::Painter,
    canvas: egui::Rect,
    selection_rect: egui::Rect,
    alpha: u8,
) {
    let color = egui::Color32::from_black_alpha(alpha);
    let selection = selection_rect.intersect(canvas);

    // Above, below, then the left and right strips between them
    for band in [
        egui::Rect::from_min_max(canvas.min, egui::pos2(canvas.max.x, selection.min.y)),
        egui::Rect::from_min_max(egui::pos2(canvas.min.x, selection.max.y), canvas.max),
        egui::Rect::from_min_max(
            egui::pos2(canvas.min.x, selection.min.y),
            egui::pos2(selection.min.x, selection.max.y),
        ),
        egui::Rect::from_min_max(
            egui::pos2(selection.max.x, selection.min.y),
            egui::pos2(canvas.max.x, selection.max.y),
        ),
    ] {
        if band.is_positive() {
            painter.rect_filled(band, 0.0, color);
        }
    }
}

/// Draws a border around the selection rectangle.
pub fn draw_selection_border(
    painter: &egui::Painter,
    selection_rect: egui::Rect,
    stroke_width: f32,
    color: egui::Color32,
) {
    painter.rect_stroke(
        selection_rect,
        0.0,
        egui::Stroke::new(stroke_width, color),
        egui::StrokeKind::Middle,
    );
}

/// Draws a section heading.
pub fn title_text(ui: &mut egui::Ui, text: &str) {
    ui.colored_label(TITLE_COLOR, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ScreenPoint;

    #[test]
    fn test_to_egui_rect_offsets_by_canvas_origin() {
        let canvas = egui::Rect::from_min_size(egui::pos2(40.0, 300.0), egui::vec2(160.0, 120.0));
        let rect = ScreenRect::from_corners(ScreenPoint::new(20.0, 10.0), ScreenPoint::new(60.0, 40.0));
        assert_eq!(
            to_egui_rect(canvas, rect),
            egui::Rect::from_min_max(egui::pos2(60.0, 310.0), egui::pos2(100.0, 340.0))
        );
    }
}
