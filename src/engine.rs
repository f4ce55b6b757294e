//! Engine façade: the one object a host talks to.
//!
//! [`EngineCore`] owns the stores, the viewport, the gesture router and the
//! connection machine. Host input goes in through the `on_*` handlers and the
//! canvas commands; every call returns the [`Action`]s the host should react
//! to (persist, mirror, redraw). Nothing here holds a reference into the host.
//!
//! Tool and read-only gating lives here. Read-only blocks every mutation of
//! nodes and edges but never the viewport.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::consts;
use crate::connection::{ConnectOutcome, ConnectionEngine, PendingConnection};
use crate::error::CanvasIssue;
use crate::flow::FlowSchedule;
use crate::geometry::node_extent;
use crate::gesture::{GestureState, PointerGestureRouter, RouterEvent, RouterSettings};
use crate::ids::IdGenerator;
use crate::input::{Button, Key, Modifiers, PointerId, PointerSample, PointerTarget, Tool, UiState, WheelDelta};
use crate::model::{Edge, EdgeId, Handles, Node, NodeDataPatch, NodeKind};
use crate::render::{NodeRenderer, PseudoCodeRenderer, Scene, edge_curve};
use crate::snapshot::{SNAPSHOT_VERSION, Snapshot, SnapshotError};
use crate::store::{EdgeSet, NodeLayoutStore};
use crate::viewport::{Point, Viewport, ViewportController, screen_to_canvas};

/// Actions returned from engine calls for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A node was added; `NodesChanged` follows.
    NodeCreated(Node),
    NodesChanged,
    /// An edge was committed by the connection machine; `EdgesChanged` follows.
    EdgeCreated(Edge),
    EdgesChanged,
    /// The canonical viewport changed.
    ViewportChanged(Viewport),
    SelectionChanged,
    PendingConnectionChanged,
    RenderNeeded,
    /// Something was absorbed instead of failing.
    Diagnostic(CanvasIssue),
}

/// Node sub-gesture owned by one pointer.
#[derive(Debug, Clone, PartialEq)]
enum NodeGesture {
    Dragging {
        node_id: String,
        /// Client position at the previous event.
        last: Point,
    },
    Resizing {
        node_id: String,
        /// Client position of the press.
        start: Point,
        /// Node size at the press.
        orig: (f64, f64),
    },
}

/// Append `action` unless an equal one is already queued.
fn push_once(actions: &mut Vec<Action>, action: Action) {
    if !actions.contains(&action) {
        actions.push(action);
    }
}

/// Core engine state. See the module docs.
#[derive(Debug, Clone)]
pub struct EngineCore {
    config: EngineConfig,
    nodes: NodeLayoutStore,
    edges: EdgeSet,
    viewport: ViewportController,
    router: PointerGestureRouter,
    connection: ConnectionEngine,
    ids: IdGenerator,
    ui: UiState,
    node_gestures: HashMap<PointerId, NodeGesture>,
    /// Client position of the container's top-left corner.
    container_origin: Point,
    /// Container size in screen pixels.
    container_size: (f64, f64),
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            nodes: NodeLayoutStore::new(),
            edges: EdgeSet::new(),
            viewport: ViewportController::new(config.zoom),
            router: PointerGestureRouter::new(),
            connection: ConnectionEngine::new(),
            ids: IdGenerator::new(),
            ui: UiState::default(),
            node_gestures: HashMap::new(),
            container_origin: Point::default(),
            container_size: (0.0, 0.0),
        }
    }

    /// Replace the id source, e.g. with [`IdGenerator::seeded`] for reproducible ids.
    #[must_use]
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    // =============================================================
    // Queries
    // =============================================================

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        self.nodes.nodes()
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        self.edges.edges()
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// The viewport to draw with right now, including any uncommitted gesture.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport.live()
    }

    /// The canonical viewport last reported through [`Action::ViewportChanged`].
    #[must_use]
    pub fn committed_viewport(&self) -> Viewport {
        self.viewport.committed()
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.router.state()
    }

    #[must_use]
    pub fn pending_connection(&self) -> Option<&PendingConnection> {
        self.connection.pending()
    }

    /// `(start, cursor)` in canvas space for the rubber-band line of a pending connection.
    #[must_use]
    pub fn pending_preview(&self) -> Option<(Point, Point)> {
        self.connection.pending().map(|p| (p.start_pos, self.router.cursor()))
    }

    /// Map a client point to canvas space under the live viewport.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        screen_to_canvas(screen, &self.viewport.live(), self.container_origin)
    }

    /// The topmost edge whose hit stroke covers the client point `screen`.
    ///
    /// The stroke is `edge_hit_width_px` wide on screen, so its half-width in
    /// canvas units shrinks as zoom grows.
    #[must_use]
    pub fn edge_at(&self, screen: Point) -> Option<EdgeId> {
        let p = self.screen_to_canvas(screen);
        let vp = self.viewport.live();
        let tolerance = vp.screen_dist_to_canvas(self.config.edge_hit_width_px / 2.0);
        let selected = self.ui.selected_edge.as_deref();

        // Selected edge paints last, so it is tested first.
        let ordered = self
            .edges
            .edges()
            .iter()
            .filter(|e| Some(e.id.as_str()) == selected)
            .chain(self.edges.edges().iter().rev().filter(|e| Some(e.id.as_str()) != selected));
        for edge in ordered {
            let Ok(curve) = edge_curve(&self.nodes, edge, &self.config) else {
                continue;
            };
            if curve.distance_to(p, consts::EDGE_HIT_SAMPLES) <= tolerance {
                return Some(edge.id.clone());
            }
        }
        None
    }

    /// Assemble the current scene with `renderer` providing node content.
    #[must_use]
    pub fn scene<R>(&self, renderer: &R) -> Scene<R::Output>
    where
        R: NodeRenderer + ?Sized,
    {
        Scene::build(&self.nodes, &self.edges, &self.ui, &self.config, renderer)
    }

    #[must_use]
    pub fn flow_schedule(&self) -> FlowSchedule {
        FlowSchedule::compute(self.nodes.nodes(), self.edges.edges(), self.config.flow_cycle_secs)
    }

    /// Text summary of the graph, one line per node and per connection.
    #[must_use]
    pub fn pseudo_code(&self) -> String {
        PseudoCodeRenderer.export(&self.nodes, &self.edges)
    }

    // =============================================================
    // Host settings
    // =============================================================

    /// Switch tools. Leaving the select tool ends node drags; leaving the connect tool drops any
    /// pending connection.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.tool == tool {
            return actions;
        }
        self.ui.tool = tool;
        if !tool.selects() {
            self.node_gestures.retain(|_, g| !matches!(g, NodeGesture::Dragging { .. }));
        }
        if !tool.connects() && self.connection.cancel() {
            actions.push(Action::PendingConnectionChanged);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Enter or leave read-only mode. Entering it abandons node gestures and any pending connection.
    pub fn set_read_only(&mut self, read_only: bool) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.read_only == read_only {
            return actions;
        }
        self.ui.read_only = read_only;
        if read_only {
            self.node_gestures.clear();
            if self.connection.cancel() {
                actions.push(Action::PendingConnectionChanged);
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Container geometry in client coordinates.
    pub fn set_container(&mut self, origin: Point, size: (f64, f64)) {
        self.container_origin = origin;
        self.container_size = size;
    }

    // =============================================================
    // Pointer input
    // =============================================================

    fn router_settings(&self) -> RouterSettings {
        RouterSettings {
            click_epsilon_px: self.config.click_epsilon_px,
            wheel_zoom_sensitivity: self.config.wheel_zoom_sensitivity,
        }
    }

    /// A pointer pressed on `target`.
    pub fn on_pointer_down(
        &mut self,
        id: PointerId,
        sample: PointerSample,
        button: Button,
        modifiers: Modifiers,
        target: PointerTarget,
    ) -> Vec<Action> {
        let mut actions = Vec::new();
        let tool = self.ui.tool;

        // In the pan tool every press drags the canvas, but only a background press can click.
        if tool == Tool::Pan && target != PointerTarget::Background {
            self.router.pointer_down_on_content(id, sample, button, modifiers, tool);
            if self.router.is_active() {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        }

        match target {
            PointerTarget::Background => {
                self.router.pointer_down(id, sample, button, modifiers, tool);
                if self.router.is_active() {
                    actions.push(Action::RenderNeeded);
                }
            }
            PointerTarget::Node(node_id) => {
                if !tool.selects() || !self.nodes.contains(&node_id) {
                    return actions;
                }
                if self.select_node(&node_id) {
                    actions.push(Action::SelectionChanged);
                    actions.push(Action::RenderNeeded);
                }
                if !self.ui.read_only && button == Button::Primary {
                    self.node_gestures.insert(id, NodeGesture::Dragging { node_id, last: sample.position });
                }
            }
            PointerTarget::ResizeGrip(node_id) => {
                if self.ui.read_only || button != Button::Primary {
                    return actions;
                }
                let Some(node) = self.nodes.get(&node_id) else {
                    return actions;
                };
                if node.kind().is_resizable() {
                    let orig = node_extent(node, self.config.default_embed_size);
                    self.node_gestures.insert(id, NodeGesture::Resizing { node_id, start: sample.position, orig });
                }
            }
            PointerTarget::Handle(handle) => {
                if self.ui.read_only {
                    return actions;
                }
                let outcome = self.connection.handle_click(
                    tool,
                    &handle,
                    &self.nodes,
                    &mut self.edges,
                    &mut self.ids,
                    &self.config,
                );
                match outcome {
                    ConnectOutcome::Ignored => {}
                    ConnectOutcome::Started | ConnectOutcome::Aborted => {
                        actions.push(Action::PendingConnectionChanged);
                        actions.push(Action::RenderNeeded);
                    }
                    ConnectOutcome::Created(edge) => {
                        actions.push(Action::EdgeCreated(edge));
                        actions.push(Action::EdgesChanged);
                        actions.push(Action::PendingConnectionChanged);
                        actions.push(Action::RenderNeeded);
                    }
                    ConnectOutcome::Duplicate(issue) => {
                        actions.push(Action::PendingConnectionChanged);
                        actions.push(Action::Diagnostic(issue));
                        actions.push(Action::RenderNeeded);
                    }
                }
            }
            PointerTarget::Edge(edge_id) => {
                if !tool.selects() || self.ui.read_only || self.edges.get(&edge_id).is_none() {
                    return actions;
                }
                let changed =
                    self.ui.selected_edge.as_deref() != Some(edge_id.as_str()) || self.ui.selected_node.is_some();
                self.ui.selected_edge = Some(edge_id);
                self.ui.selected_node = None;
                if changed {
                    actions.push(Action::SelectionChanged);
                    actions.push(Action::RenderNeeded);
                }
            }
        }
        actions
    }

    /// A pointer moved to client position `position`.
    pub fn on_pointer_move(&mut self, id: PointerId, position: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        let zoom = self.viewport.live().zoom;

        match self.node_gestures.get_mut(&id) {
            Some(NodeGesture::Dragging { node_id, last }) => {
                let (dx, dy) = position.delta_from(*last);
                *last = position;
                let moved = self
                    .nodes
                    .get(node_id)
                    .map(|n| n.position.offset(dx / zoom, dy / zoom))
                    .is_some_and(|to| self.nodes.move_node(node_id, to));
                if moved {
                    actions.push(Action::NodesChanged);
                    actions.push(Action::RenderNeeded);
                }
            }
            Some(NodeGesture::Resizing { node_id, start, orig }) => {
                let (dx, dy) = position.delta_from(*start);
                let (w, h) = (orig.0 + dx / zoom, orig.1 + dy / zoom);
                let before = self.nodes.get(node_id).map(|n| (n.width, n.height));
                if let Some(r) = self.nodes.resize_node(node_id, w, h, self.config.min_node_size) {
                    if r.clamped {
                        tracing::trace!(node_id = %node_id, width = w, height = h, "resize clamped to minimum");
                    }
                    if before != Some((Some(r.applied.0), Some(r.applied.1))) {
                        actions.push(Action::NodesChanged);
                        actions.push(Action::RenderNeeded);
                    }
                }
            }
            None => {}
        }

        let events = self.router.pointer_move(id, position, &mut self.viewport, self.container_origin);
        self.apply_router_events(events, &mut actions);
        actions
    }

    /// A pointer lifted.
    pub fn on_pointer_up(&mut self, id: PointerId, position: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        self.node_gestures.remove(&id);
        let settings = self.router_settings();
        let events = self.router.pointer_up(id, position, &mut self.viewport, &settings);
        self.apply_router_events(events, &mut actions);
        actions
    }

    /// Pointer cancel and pointer leave clean up exactly like a lift.
    pub fn on_pointer_cancel(&mut self, id: PointerId, position: Point) -> Vec<Action> {
        self.on_pointer_up(id, position)
    }

    /// Wheel or trackpad scroll at client position `position`.
    pub fn on_wheel(&mut self, position: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        let settings = self.router_settings();
        let events =
            self.router.wheel(position, delta, modifiers, &mut self.viewport, self.container_origin, &settings);
        self.apply_router_events(events, &mut actions);
        actions
    }

    fn apply_router_events(&mut self, events: Vec<RouterEvent>, actions: &mut Vec<Action>) {
        for event in events {
            match event {
                RouterEvent::ViewportMoved => push_once(actions, Action::RenderNeeded),
                RouterEvent::ViewportCommitted(vp) => actions.push(Action::ViewportChanged(vp)),
                RouterEvent::BackgroundClick => {
                    if self.ui.clear_selection() {
                        actions.push(Action::SelectionChanged);
                    }
                    if self.connection.cancel() {
                        actions.push(Action::PendingConnectionChanged);
                    }
                    push_once(actions, Action::RenderNeeded);
                }
                RouterEvent::CursorMoved(_) => {
                    if self.connection.pending().is_some() {
                        push_once(actions, Action::RenderNeeded);
                    }
                }
            }
        }
    }

    // =============================================================
    // Keyboard
    // =============================================================

    /// `Delete`/`Backspace` remove the selection; `Escape` cancels and deselects.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.read_only {
            return actions;
        }
        if key.is_delete() {
            if let Some(node_id) = self.ui.selected_node.clone() {
                actions.extend(self.remove_node(&node_id));
            }
            if let Some(edge_id) = self.ui.selected_edge.take() {
                if self.edges.remove(&edge_id).is_some() {
                    actions.push(Action::EdgesChanged);
                }
                push_once(&mut actions, Action::SelectionChanged);
                push_once(&mut actions, Action::RenderNeeded);
            }
        } else if key.is_escape() {
            if self.connection.cancel() {
                actions.push(Action::PendingConnectionChanged);
            }
            if self.ui.clear_selection() {
                actions.push(Action::SelectionChanged);
            }
            if !actions.is_empty() {
                actions.push(Action::RenderNeeded);
            }
        }
        actions
    }

    // =============================================================
    // Node and edge commands
    // =============================================================

    /// Add a node of `kind` centred on client point `at`, or on the container centre.
    pub fn add_node(&mut self, kind: NodeKind, at: Option<Point>) -> Vec<Action> {
        if self.ui.read_only {
            return Vec::new();
        }
        let screen = at.unwrap_or_else(|| {
            self.container_origin.offset(self.container_size.0 / 2.0, self.container_size.1 / 2.0)
        });
        let center = self.screen_to_canvas(screen);
        let (width, height) = if kind == NodeKind::Embed {
            (self.config.default_embed_size.0, Some(self.config.default_embed_size.1))
        } else {
            (self.config.default_node_size.0, None)
        };
        let nodes = &self.nodes;
        let node = Node {
            id: self.ids.fresh(|id| nodes.contains(id)),
            position: center.offset(-width / 2.0, -height.unwrap_or(self.config.default_node_size.1) / 2.0),
            data: kind.default_data(),
            handles: Handles::uniform(1),
            width: Some(width),
            height,
        };
        self.nodes.insert(node.clone());
        tracing::debug!(node_id = %node.id, kind = kind.as_str(), "node added");
        vec![Action::NodeCreated(node), Action::NodesChanged, Action::RenderNeeded]
    }

    /// Merge a content patch into a node.
    pub fn update_node_data(&mut self, id: &str, patch: &NodeDataPatch) -> Vec<Action> {
        if self.ui.read_only || !self.nodes.update_data(id, patch) {
            return Vec::new();
        }
        vec![Action::NodesChanged, Action::RenderNeeded]
    }

    /// Move a node's top-left corner. Only the select tool moves nodes.
    pub fn move_node(&mut self, id: &str, position: Point) -> Vec<Action> {
        if self.ui.read_only || !self.ui.tool.selects() || !self.nodes.move_node(id, position) {
            return Vec::new();
        }
        vec![Action::NodesChanged, Action::RenderNeeded]
    }

    /// Set an explicit size on a resizable node, clamped to the configured minimum.
    pub fn resize_node(&mut self, id: &str, width: f64, height: f64) -> Vec<Action> {
        if self.ui.read_only {
            return Vec::new();
        }
        let Some(resized) = self.nodes.resize_node(id, width, height, self.config.min_node_size) else {
            return Vec::new();
        };
        let mut actions = vec![Action::NodesChanged, Action::RenderNeeded];
        if resized.clamped {
            // Clamping only ever raises a dimension.
            let (requested, applied) =
                if resized.applied.0 > width { (width, resized.applied.0) } else { (height, resized.applied.1) };
            let issue = CanvasIssue::ClampedInput { what: "node size", requested, applied };
            tracing::debug!(node_id = %id, %issue, "resize clamped");
            actions.push(Action::Diagnostic(issue));
        }
        actions
    }

    /// Delete a node and every edge that references it.
    pub fn delete_node(&mut self, id: &str) -> Vec<Action> {
        if self.ui.read_only {
            return Vec::new();
        }
        self.remove_node(id)
    }

    fn remove_node(&mut self, id: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.nodes.remove(id).is_none() {
            return actions;
        }
        actions.push(Action::NodesChanged);

        let removed = self.edges.remove_touching(id);
        if !removed.is_empty() {
            actions.push(Action::EdgesChanged);
        }
        tracing::debug!(node_id = %id, edges = removed.len(), "node deleted");

        let edge_selected = self.ui.selected_edge.as_ref().is_some_and(|e| removed.iter().any(|r| r.id == *e));
        if self.ui.selected_node.as_deref() == Some(id) || edge_selected {
            self.ui.clear_selection();
            actions.push(Action::SelectionChanged);
        }
        if self.connection.pending().is_some_and(|p| p.source_node_id == id) {
            self.connection.cancel();
            actions.push(Action::PendingConnectionChanged);
        }
        self.node_gestures.retain(|_, g| match g {
            NodeGesture::Dragging { node_id, .. } | NodeGesture::Resizing { node_id, .. } => node_id != id,
        });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Delete an edge from its delete affordance. Only the connect tool deletes edges this way.
    pub fn delete_edge(&mut self, id: &str) -> Vec<Action> {
        if self.ui.read_only {
            return Vec::new();
        }
        let Some(edge) = ConnectionEngine::delete_edge(self.ui.tool, id, &mut self.edges) else {
            return Vec::new();
        };
        let mut actions = vec![Action::EdgesChanged];
        if self.ui.selected_edge.as_deref() == Some(edge.id.as_str()) {
            self.ui.selected_edge = None;
            actions.push(Action::SelectionChanged);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Select a node (select tool only). Returns whether the selection changed.
    fn select_node(&mut self, id: &str) -> bool {
        let changed = self.ui.selected_node.as_deref() != Some(id) || self.ui.selected_edge.is_some();
        self.ui.selected_node = Some(id.to_owned());
        self.ui.selected_edge = None;
        changed
    }

    // =============================================================
    // Auto-size
    // =============================================================

    /// Queue a measured content size. Never changes the node immediately.
    pub fn observe_node_size(&mut self, id: &str, width: f64, height: f64) {
        self.nodes.observe_size(id, width, height);
    }

    /// Apply queued measurements, typically once per frame after layout.
    pub fn flush_auto_size(&mut self) -> Vec<Action> {
        if !self.nodes.has_pending_sizes() {
            return Vec::new();
        }
        let changed = self.nodes.flush_auto_size(self.config.auto_size_tolerance_px);
        if changed.is_empty() {
            return Vec::new();
        }
        tracing::trace!(count = changed.len(), "auto-size applied");
        vec![Action::NodesChanged, Action::RenderNeeded]
    }

    // =============================================================
    // Document
    // =============================================================

    /// Parse and load a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns the parse or validation error; the canvas is left untouched.
    pub fn load_snapshot(&mut self, json: &str) -> Result<Vec<Action>, SnapshotError> {
        let snapshot = Snapshot::parse(json).inspect_err(|err| {
            tracing::warn!(error = %err, "snapshot rejected");
        })?;
        self.load(snapshot)
    }

    /// Replace the whole graph (and the viewport, when the snapshot has one).
    ///
    /// In-flight gestures, the pending connection, and the selection are reset.
    ///
    /// # Errors
    ///
    /// Returns the validation error; the canvas is left untouched.
    pub fn load(&mut self, snapshot: Snapshot) -> Result<Vec<Action>, SnapshotError> {
        snapshot.validate().inspect_err(|err| {
            tracing::warn!(error = %err, "snapshot rejected");
        })?;

        let mut actions = self.reset_interaction();
        self.nodes.load(snapshot.nodes);
        self.edges.load(snapshot.edges);
        actions.push(Action::NodesChanged);
        actions.push(Action::EdgesChanged);

        if let Some(vp) = snapshot.viewport {
            self.viewport.reset(vp);
            let applied = self.viewport.committed();
            if (applied.zoom - vp.zoom).abs() > f64::EPSILON {
                let issue = CanvasIssue::ClampedInput { what: "zoom", requested: vp.zoom, applied: applied.zoom };
                tracing::debug!(%issue, "snapshot viewport clamped");
                actions.push(Action::Diagnostic(issue));
            }
            actions.push(Action::ViewportChanged(applied));
        }
        tracing::debug!(nodes = self.nodes.len(), edges = self.edges.len(), "graph loaded");
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Atomically replace nodes and edges, keeping the viewport.
    ///
    /// # Errors
    ///
    /// Returns the validation error; the canvas is left untouched.
    pub fn replace_graph(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Vec<Action>, SnapshotError> {
        self.load(Snapshot { version: SNAPSHOT_VERSION.to_owned(), nodes, edges, viewport: None })
    }

    /// The current graph and committed viewport.
    #[must_use]
    pub fn save_snapshot(&self) -> Snapshot {
        Snapshot::new(self.nodes.nodes().to_vec(), self.edges.edges().to_vec(), self.viewport.committed())
    }

    /// Remove every node and edge.
    pub fn clear_canvas(&mut self) -> Vec<Action> {
        if self.ui.read_only {
            return Vec::new();
        }
        let mut actions = self.reset_interaction();
        self.nodes.clear();
        self.edges.clear();
        actions.push(Action::NodesChanged);
        actions.push(Action::EdgesChanged);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Return to `{x: 0, y: 0, zoom: 1}`, abandoning any viewport gesture.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.router.reset(&mut self.viewport);
        self.viewport.reset(Viewport::default());
        vec![Action::ViewportChanged(self.viewport.committed()), Action::RenderNeeded]
    }

    /// Drop gestures, the pending connection, and the selection.
    fn reset_interaction(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.router.reset(&mut self.viewport);
        self.node_gestures.clear();
        if self.connection.cancel() {
            actions.push(Action::PendingConnectionChanged);
        }
        if self.ui.clear_selection() {
            actions.push(Action::SelectionChanged);
        }
        actions
    }
}
