//! Region selection state machine.
//!
//! [`RegionSelector`] tracks a drag gesture on the on-screen canvas and turns
//! it into a [`RegionOfInterest`] in canvas space. It owns no UI state: the
//! window forwards pointer press, motion and release to it and asks it what
//! rectangle to draw.
//!
//! A drag only replaces the stored region when it moved on both axes.
//! Clicks and single-axis flicks leave the previous region in place.

use crate::geometry::{CanvasGeometry, RegionOfInterest, ScreenPoint, ScreenRect};
use tracing::debug;

/// Whether a drag gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionState {
    Idle,
    Dragging { start: ScreenPoint, end: ScreenPoint },
}

/// Interactive selector converting screen drags into canvas regions.
#[derive(Debug, Clone)]
pub struct RegionSelector {
    geometry: CanvasGeometry,
    state: SelectionState,
    /// Last committed region, in canvas space.
    region: Option<RegionOfInterest>,
    /// Screen rectangle matching `region`, kept for drawing.
    committed: Option<ScreenRect>,
    /// Set once a drag commits a region; seeding is refused afterwards.
    has_committed_drag: bool,
}

impl RegionSelector {
    pub fn new(geometry: CanvasGeometry) -> Self {
        Self {
            geometry,
            state: SelectionState::Idle,
            region: None,
            committed: None,
            has_committed_drag: false,
        }
    }

    pub fn geometry(&self) -> &CanvasGeometry {
        &self.geometry
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging { .. })
    }

    /// The last committed region, if any drag or seed produced one.
    pub fn region(&self) -> Option<RegionOfInterest> {
        self.region
    }

    /// The rectangle to draw: the live drag while dragging, otherwise the
    /// committed selection.
    pub fn display_rect(&self) -> Option<ScreenRect> {
        match self.state {
            SelectionState::Dragging { start, end } => Some(ScreenRect::from_corners(start, end)),
            SelectionState::Idle => self.committed,
        }
    }

    /// Initializes the on-screen rectangle from a previously stored region.
    ///
    /// Only honored until a drag commits a region; clicks and single-axis
    /// drags do not count. The region is clamped to the canvas.
    pub fn seed(&mut self, existing: RegionOfInterest) {
        if self.has_committed_drag {
            debug!("Ignoring seed after a committed drag");
            return;
        }

        let region = existing.clamped_to(self.geometry.width(), self.geometry.height());
        self.committed = Some(self.geometry.to_screen(region));
        self.region = Some(region);
        debug!(?region, "Seeded region selector");
    }

    /// Starts a drag at `p`. Ignored unless idle and `p` is on the canvas.
    pub fn begin_drag(&mut self, p: ScreenPoint) {
        if self.is_dragging() || !self.geometry.contains(p) {
            return;
        }

        self.state = SelectionState::Dragging { start: p, end: p };
    }

    /// Moves the drag's end corner to `p`. Ignored when idle or off-canvas.
    pub fn update_drag(&mut self, p: ScreenPoint) {
        if !self.geometry.contains(p) {
            return;
        }

        if let SelectionState::Dragging { end, .. } = &mut self.state {
            *end = p;
        }
    }

    /// Finishes the drag and returns the new region if it changed.
    ///
    /// Call this on every pointer release reported by the input system,
    /// wherever the pointer is, so the selector never stays stuck dragging.
    /// Returns `None` when idle, or when the drag did not move on both axes.
    pub fn end_drag(&mut self) -> Option<RegionOfInterest> {
        let SelectionState::Dragging { start, end } = self.state else {
            return None;
        };
        self.state = SelectionState::Idle;

        if start.x == end.x || start.y == end.y {
            debug!(?start, ?end, "Drag did not span two dimensions, keeping region");
            return None;
        }

        let rect = ScreenRect::from_corners(start, end);
        let region = self.geometry.to_canvas(rect);
        self.committed = Some(rect);
        self.region = Some(region);
        self.has_committed_drag = true;
        debug!(?region, "Committed region");
        Some(region)
    }
}
