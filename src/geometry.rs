//! Edge geometry: handle placement and the cubic bezier each edge is drawn with.
//!
//! Everything here is a pure function of node records and the config. Handles
//! on one side are spread evenly around the side's centre line; an edge leaves
//! its source handle and enters its target handle along the handle side's
//! outward normal, `curvature` pixels deep.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::config::EngineConfig;
use crate::model::{Node, Side};
use crate::viewport::Point;

/// Node box used for handle placement. Unset or non-positive sizes fall back to `default`.
#[must_use]
pub fn node_extent(node: &Node, default: (f64, f64)) -> (f64, f64) {
    let pick = |v: Option<f64>, d: f64| v.filter(|v| *v > 0.0).unwrap_or(d);
    (pick(node.width, default.0), pick(node.height, default.1))
}

/// Offset of handle `index` from the centre line of a side holding `count` handles.
///
/// The group of `count` circles of `diameter`, separated by `gap`, is centred on
/// the line, so the offsets of a side always sum to zero.
#[must_use]
pub fn spread_offset(count: u32, index: u32, diameter: f64, gap: f64) -> f64 {
    let count = f64::from(count);
    let total_spread = count * diameter + (count - 1.0) * gap;
    let first = -total_spread / 2.0 + diameter / 2.0;
    first + f64::from(index) * (diameter + gap)
}

/// Position of a handle relative to the node's top-left corner.
#[must_use]
pub fn handle_offset(node: &Node, side: Side, index: u32, cfg: &EngineConfig) -> Point {
    let (w, h) = node_extent(node, cfg.default_node_size);
    let along = spread_offset(node.handles.count(side), index, cfg.handle_diameter, cfg.handle_gap);
    match side {
        Side::Left => Point::new(0.0, h / 2.0 + along),
        Side::Right => Point::new(w, h / 2.0 + along),
        Side::Top => Point::new(w / 2.0 + along, 0.0),
        Side::Bottom => Point::new(w / 2.0 + along, h),
    }
}

/// Canvas-space position of a handle.
#[must_use]
pub fn handle_anchor(node: &Node, side: Side, index: u32, cfg: &EngineConfig) -> Point {
    let off = handle_offset(node, side, index, cfg);
    node.position.offset(off.x, off.y)
}

/// A cubic bezier from a source handle to a target handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierCurve {
    pub start: Point,
    pub cp1: Point,
    pub cp2: Point,
    pub end: Point,
}

impl BezierCurve {
    /// Curve leaving `start` outward from `start_side` and arriving at `end` from `end_side`.
    #[must_use]
    pub fn new(start: Point, start_side: Side, end: Point, end_side: Side, curvature: f64) -> Self {
        let push = |p: Point, side: Side| {
            let (nx, ny) = side.outward();
            p.offset(nx * curvature, ny * curvature)
        };
        Self { start, cp1: push(start, start_side), cp2: push(end, end_side), end }
    }

    /// SVG path data: `M sx sy C c1x c1y, c2x c2y, ex ey`.
    #[must_use]
    pub fn path_data(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x, self.start.y, self.cp1.x, self.cp1.y, self.cp2.x, self.cp2.y, self.end.x, self.end.y
        )
    }

    /// Evaluate the curve at `t` (clamped to `[0, 1]`) in the Bernstein basis.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let (b0, b1, b2, b3) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
        Point::new(
            b0 * self.start.x + b1 * self.cp1.x + b2 * self.cp2.x + b3 * self.end.x,
            b0 * self.start.y + b1 * self.cp1.y + b2 * self.cp2.y + b3 * self.end.y,
        )
    }

    /// Point at `t = 0.5`, where the delete affordance sits.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        self.point_at(0.5)
    }

    /// Approximate distance from `p` to the curve, flattening it into `samples` segments.
    #[must_use]
    pub fn distance_to(&self, p: Point, samples: usize) -> f64 {
        let samples = samples.max(1);
        let mut best = f64::INFINITY;
        let mut prev = self.start;
        for i in 1..=samples {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / samples as f64;
            let curr = self.point_at(t);
            best = best.min(distance_to_segment(p, prev, curr));
            prev = curr;
        }
        best
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = b.delta_from(a);
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(a.offset(dx * t, dy * t))
}
