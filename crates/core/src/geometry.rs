//! Canvas geometry and coordinate mapping.
//!
//! The launcher presents the output image as a scaled-down canvas of fixed
//! on-screen height. Two coordinate systems meet here:
//!
//! - **Screen space**: pixels of the on-screen canvas, origin top-left,
//!   relative to the canvas widget's own origin.
//! - **Canvas space**: pixels of the full output image, origin bottom-left,
//!   `y` measured upward from the bottom edge.
//!
//! [`CanvasGeometry::to_canvas`] and [`CanvasGeometry::to_screen`] convert
//! rectangles between the two and are inverses of each other for any region
//! that lies inside the canvas.

use crate::error::{AppError, Result};

/// A pointer position in screen space, relative to the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in screen space with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Builds a rectangle from two opposite corners given in any order.
    ///
    /// Users can drag in any direction, so the corners are sorted per axis.
    pub fn from_corners(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            min: ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: ScreenPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// A sub-rectangle of the output image in canvas space (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionOfInterest {
    pub x: u32,
    pub y: u32,
    pub dx: u32,
    pub dy: u32,
}

impl RegionOfInterest {
    pub const fn new(x: u32, y: u32, dx: u32, dy: u32) -> Self {
        Self { x, y, dx, dy }
    }

    /// The region covering an entire `width` x `height` canvas.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Shrinks the region so that it lies within a `width` x `height` canvas.
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            dx: self.dx.min(width - x),
            dy: self.dy.min(height - y),
        }
    }
}

/// Logical canvas size plus the scale used to present it on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    width: u32,
    height: u32,
    display_height: f32,
    scale_factor: f32,
}

impl CanvasGeometry {
    /// Creates the geometry for a `width` x `height` canvas shown
    /// `display_height` screen pixels tall.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidGeometry`] if `height` is zero or
    /// `display_height` is not a positive finite number.
    pub fn new(width: u32, height: u32, display_height: f32) -> Result<Self> {
        if height == 0 {
            return Err(AppError::geometry("canvas height must be non-zero"));
        }
        if !display_height.is_finite() || display_height <= 0.0 {
            return Err(AppError::geometry(format!(
                "display height must be positive, got {}",
                display_height
            )));
        }

        Ok(Self {
            width,
            height,
            display_height,
            scale_factor: display_height / height as f32,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Screen pixels per canvas pixel, applied uniformly to both axes.
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn display_width(&self) -> f32 {
        self.width as f32 * self.scale_factor
    }

    pub fn display_height(&self) -> f32 {
        self.display_height
    }

    /// Whether `p` lies on the on-screen canvas (edges included).
    pub fn contains(&self, p: ScreenPoint) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.display_width() && p.y <= self.display_height
    }

    /// Converts a screen rectangle into a canvas-space region.
    ///
    /// Values are rounded to the nearest canvas pixel and clamped to the
    /// canvas, and the vertical axis is flipped so `y` counts from the bottom.
    pub fn to_canvas(&self, rect: ScreenRect) -> RegionOfInterest {
        let x = self.to_canvas_units(rect.min.x).min(self.width);
        let dx = self.to_canvas_units(rect.width()).min(self.width - x);
        let top = self.to_canvas_units(rect.min.y).min(self.height);
        let dy = self.to_canvas_units(rect.height()).min(self.height - top);

        RegionOfInterest {
            x,
            y: self.height - top - dy,
            dx,
            dy,
        }
    }

    /// Converts a canvas-space region into the screen rectangle that
    /// [`to_canvas`](Self::to_canvas) maps back onto it.
    pub fn to_screen(&self, region: RegionOfInterest) -> ScreenRect {
        let r = region.clamped_to(self.width, self.height);
        let s = self.scale_factor;
        let top = self.height - r.y - r.dy;

        ScreenRect {
            min: ScreenPoint::new(r.x as f32 * s, top as f32 * s),
            max: ScreenPoint::new((r.x + r.dx) as f32 * s, (top + r.dy) as f32 * s),
        }
    }

    fn to_canvas_units(&self, screen: f32) -> u32 {
        // `as` saturates, so negative or NaN input lands on 0
        (screen / self.scale_factor).round() as u32
    }
}
