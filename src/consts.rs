//! Shared numeric constants for the canvas engine.
//!
//! These are the defaults behind [`crate::config::EngineConfig`]. Code that
//! needs a tunable value reads it from the config; the constants here exist so
//! the defaults are named in one place.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest zoom factor reachable by wheel, pinch, or snapshot load.
pub const ZOOM_MIN: f64 = 0.1;

/// Largest zoom factor reachable by wheel, pinch, or snapshot load.
pub const ZOOM_MAX: f64 = 5.0;

/// Zoom change per unit of wheel `deltaY` while ctrl/cmd is held.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

/// Maximum pointer travel, in screen pixels, for a background press to count as a click.
pub const CLICK_EPSILON_PX: f64 = 5.0;

// ── Nodes ───────────────────────────────────────────────────────

/// Width assumed for a node that has not reported one.
pub const DEFAULT_NODE_WIDTH: f64 = 200.0;

/// Height assumed for a node that has not reported one.
pub const DEFAULT_NODE_HEIGHT: f64 = 100.0;

/// Initial width of a newly added embed node.
pub const DEFAULT_EMBED_WIDTH: f64 = 400.0;

/// Initial height of a newly added embed node (4:3 with the width).
pub const DEFAULT_EMBED_HEIGHT: f64 = 300.0;

/// Minimum width accepted by an explicit resize.
pub const MIN_RESIZE_WIDTH: f64 = 200.0;

/// Minimum height accepted by an explicit resize.
pub const MIN_RESIZE_HEIGHT: f64 = 150.0;

/// Measured sizes within this many pixels of the stored size are ignored.
pub const AUTO_SIZE_TOLERANCE_PX: f64 = 1.0;

// ── Handles and edges ───────────────────────────────────────────

/// Visual diameter of a connection handle.
pub const HANDLE_DIAMETER: f64 = 14.0;

/// Gap between adjacent handles on the same side.
pub const HANDLE_GAP: f64 = 12.0;

/// Distance from an endpoint to its bezier control point.
pub const BEZIER_CURVATURE: f64 = 50.0;

/// Width of the invisible stroke used for edge hit-testing, in screen pixels.
pub const EDGE_HIT_WIDTH_PX: f64 = 20.0;

/// Number of segments used when sampling a bezier for hit-testing.
pub const EDGE_HIT_SAMPLES: usize = 32;

// ── Flow animation ──────────────────────────────────────────────

/// Duration of one packet traversal along a single edge, in seconds.
pub const FLOW_CYCLE_SECS: f64 = 2.0;
