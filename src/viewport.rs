//! Pan/zoom viewport and the screen↔canvas mapping.
//!
//! Pan lives in screen pixels and is applied after scaling, so a screen point
//! `s` maps to canvas space as `(s - origin - pan) / zoom`. [`ViewportController`]
//! wraps the viewport in a [`Staged`] buffer: gestures move the live copy every
//! frame, and the canonical copy only changes on commit.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_MAX, ZOOM_MIN};
use crate::staging::Staged;

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// `self` translated by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Inclusive zoom clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: ZOOM_MIN, max: ZOOM_MAX }
    }
}

impl ZoomBounds {
    /// Clamp `zoom` into `[min, max]`. Non-finite input falls back to `1.0` before clamping.
    ///
    /// Inverted bounds are read in either order and NaN bounds are ignored.
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        let zoom = if zoom.is_finite() { zoom } else { 1.0 };
        let (lo, hi) = (self.min.min(self.max), self.min.max(self.max));
        zoom.max(lo).min(hi)
    }

    #[must_use]
    pub fn contains(&self, zoom: f64) -> bool {
        (self.min..=self.max).contains(&zoom)
    }
}

/// Pan offset (screen pixels) and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0 }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// Pan offset as a point.
    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Convert a container-relative screen point to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.zoom,
            y: (screen.y - self.y) / self.zoom,
        }
    }

    /// Convert a canvas point to container-relative screen coordinates.
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom + self.x,
            y: canvas.y * self.zoom + self.y,
        }
    }

    /// Convert a screen-space distance to canvas units.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Translate the pan offset by an unscaled screen delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Scale to `new_zoom` (clamped) keeping the canvas point under `anchor` fixed on screen.
    ///
    /// `anchor` is container-relative. Returns the zoom actually applied.
    pub fn zoom_at(&mut self, anchor: Point, new_zoom: f64, bounds: &ZoomBounds) -> f64 {
        let new_zoom = bounds.clamp(new_zoom);
        let under_anchor = self.screen_to_canvas(anchor);
        self.x = anchor.x - under_anchor.x * new_zoom;
        self.y = anchor.y - under_anchor.y * new_zoom;
        self.zoom = new_zoom;
        new_zoom
    }

    /// Copy of `self` with zoom clamped into `bounds` and non-finite pan zeroed.
    #[must_use]
    pub fn sanitized(self, bounds: &ZoomBounds) -> Self {
        Self {
            x: if self.x.is_finite() { self.x } else { 0.0 },
            y: if self.y.is_finite() { self.y } else { 0.0 },
            zoom: bounds.clamp(self.zoom),
        }
    }
}

/// `(point - container_origin - pan) / zoom`.
#[must_use]
pub fn screen_to_canvas(point: Point, viewport: &Viewport, container_origin: Point) -> Point {
    let (rx, ry) = point.delta_from(container_origin);
    viewport.screen_to_canvas(Point::new(rx, ry))
}

/// Inverse of [`screen_to_canvas`].
#[must_use]
pub fn canvas_to_screen(point: Point, viewport: &Viewport, container_origin: Point) -> Point {
    viewport.canvas_to_screen(point).offset(container_origin.x, container_origin.y)
}

/// Owns the staged viewport and its zoom clamp.
#[derive(Debug, Clone)]
pub struct ViewportController {
    state: Staged<Viewport>,
    bounds: ZoomBounds,
}

impl ViewportController {
    #[must_use]
    pub fn new(bounds: ZoomBounds) -> Self {
        Self { state: Staged::new(Viewport::default()), bounds }
    }

    /// Viewport to render with right now (may be mid-gesture).
    #[must_use]
    pub fn live(&self) -> Viewport {
        self.state.live()
    }

    /// Canonical viewport, updated only at commit points.
    #[must_use]
    pub fn committed(&self) -> Viewport {
        self.state.committed()
    }

    #[must_use]
    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    #[must_use]
    pub fn has_uncommitted(&self) -> bool {
        self.state.is_dirty()
    }

    /// Pan the live viewport.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.state.stage(|vp| vp.pan_by(dx, dy));
    }

    /// Anchor-stable zoom on the live viewport. Returns the clamped zoom applied.
    pub fn zoom_at(&mut self, anchor: Point, new_zoom: f64) -> f64 {
        let bounds = self.bounds;
        let mut applied = new_zoom;
        self.state.stage(|vp| applied = vp.zoom_at(anchor, new_zoom, &bounds));
        if (applied - new_zoom).abs() > f64::EPSILON {
            tracing::trace!(requested = new_zoom, applied, "zoom clamped");
        }
        applied
    }

    /// Flush the live viewport. Returns it if anything changed.
    pub fn commit(&mut self) -> Option<Viewport> {
        self.state.commit()
    }

    /// Abandon live changes.
    pub fn discard(&mut self) {
        self.state.discard();
    }

    /// Replace both copies (snapshot load, reset view). Zoom is clamped.
    pub fn reset(&mut self, viewport: Viewport) {
        self.state.reset(viewport.sanitized(&self.bounds));
    }
}
