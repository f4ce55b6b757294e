//! Input model: tools, modifier keys, pointers, and what a pointer landed on.
//!
//! These are the types the host builds from its native events before handing
//! them to [`crate::engine::EngineCore`]. `Tool` and `Modifiers` capture the
//! user's intent at the time of an event; `PointerTarget` tells the engine
//! which layer (background, node, handle, edge) received the press.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::model::{EdgeId, HandleRef, NodeId};
use crate::viewport::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Select and drag nodes, select edges (default).
    #[default]
    Select,
    /// Click handles to connect nodes; click an edge's affordance to delete it.
    Connect,
    /// Any single-pointer drag pans the canvas.
    Pan,
}

impl Tool {
    /// Whether node drag and node/edge selection apply.
    #[must_use]
    pub fn selects(self) -> bool {
        self == Self::Select
    }

    /// Whether handle clicks and edge deletion apply.
    #[must_use]
    pub fn connects(self) -> bool {
        self == Self::Connect
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl or Cmd: turns wheel scrolling into zoom.
    #[must_use]
    pub fn zoom(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Device class that produced a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Host-assigned pointer identifier, stable from down to up.
pub type PointerId = i64;

/// Last known state of an active pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Client (page) coordinates in screen pixels.
    pub position: Point,
    pub kind: PointerKind,
}

impl PointerSample {
    #[must_use]
    pub fn new(position: Point, kind: PointerKind) -> Self {
        Self { position, kind }
    }

    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), PointerKind::Mouse)
    }

    #[must_use]
    pub fn touch(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), PointerKind::Touch)
    }
}

/// What received a pointer press.
///
/// Only `Background` presses reach the gesture router; the other targets
/// are handled by the layer they belong to and never start a pan or pinch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas.
    Background,
    /// A node's body.
    Node(NodeId),
    /// A node's resize grip.
    ResizeGrip(NodeId),
    /// A connection handle.
    Handle(HandleRef),
    /// An edge's wide hit stroke.
    Edge(EdgeId),
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// `Delete` or `Backspace`.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// When set, nothing but the viewport can change.
    pub read_only: bool,
    /// The currently selected node, if any.
    pub selected_node: Option<NodeId>,
    /// The currently selected edge, if any.
    pub selected_edge: Option<EdgeId>,
}

impl UiState {
    /// Drop both selections. Returns whether anything was selected.
    pub fn clear_selection(&mut self) -> bool {
        let had = self.selected_node.is_some() || self.selected_edge.is_some();
        self.selected_node = None;
        self.selected_edge = None;
        had
    }
}
