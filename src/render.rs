//! Scene assembly: the read-only view a host draws from.
//!
//! This module never draws. It resolves every edge against the node store,
//! computes its bezier and flow timing, asks the injected [`NodeRenderer`] for
//! each node's content, and hands back a [`Scene`]. Edges whose references do
//! not resolve are left out of the scene and reported in [`Scene::issues`].
//!
//! [`PseudoCodeRenderer`] is the built-in text renderer used for the
//! pseudo-code export.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::config::EngineConfig;
use crate::error::CanvasIssue;
use crate::flow::{EdgeTiming, FlowSchedule};
use crate::geometry::{BezierCurve, handle_anchor, node_extent};
use crate::input::UiState;
use crate::model::{Edge, EdgeId, Node, NodeData, NodeId};
use crate::store::{EdgeSet, NodeLayoutStore};
use crate::viewport::Point;

/// Produces host content for one node. The engine knows nothing about what it returns.
pub trait NodeRenderer {
    type Output;

    fn render_node(&self, node: &Node) -> Self::Output;
}

/// Bezier for `edge`, from its source handle anchor to its target handle anchor.
///
/// # Errors
///
/// Returns [`CanvasIssue::InvalidReference`] when an endpoint or handle does not exist.
pub fn edge_curve(nodes: &NodeLayoutStore, edge: &Edge, cfg: &EngineConfig) -> Result<BezierCurve, CanvasIssue> {
    let (source, target) = nodes.endpoints(edge)?;
    Ok(BezierCurve::new(
        handle_anchor(source, edge.source_side, edge.source_handle, cfg),
        edge.source_side,
        handle_anchor(target, edge.target_side, edge.target_handle, cfg),
        edge.target_side,
        cfg.curvature,
    ))
}

// =============================================================
// SCENE
// =============================================================

/// One drawable edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeView {
    pub id: EdgeId,
    pub curve: BezierCurve,
    /// SVG path data for `curve`.
    pub path: String,
    /// Where the delete affordance sits.
    pub midpoint: Point,
    pub timing: Option<EdgeTiming>,
    pub selected: bool,
    /// Whether the flow packet is animated (hidden while connecting).
    pub show_flow: bool,
    /// Whether the delete affordance is shown (connect tool only).
    pub show_delete: bool,
}

/// One drawable node with its rendered content.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView<C> {
    pub id: NodeId,
    pub position: Point,
    pub size: (f64, f64),
    pub selected: bool,
    pub content: C,
}

/// Everything a host needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<C> {
    /// Edges in draw order; a selected edge comes last so it paints on top.
    pub edges: Vec<EdgeView>,
    pub nodes: Vec<NodeView<C>>,
    /// Repeat period shared by every flow animation.
    pub flow_period_secs: f64,
    /// Edges left out because their references did not resolve.
    pub issues: Vec<CanvasIssue>,
}

impl<C> Scene<C> {
    /// Assemble a scene from the current stores.
    #[must_use]
    pub fn build<R>(
        nodes: &NodeLayoutStore,
        edges: &EdgeSet,
        ui: &UiState,
        cfg: &EngineConfig,
        renderer: &R,
    ) -> Self
    where
        R: NodeRenderer<Output = C> + ?Sized,
    {
        let schedule = FlowSchedule::compute(nodes.nodes(), edges.edges(), cfg.flow_cycle_secs);
        let connecting = ui.tool.connects();

        let mut views = Vec::with_capacity(edges.len());
        let mut issues = Vec::new();
        let mut selected_view = None;
        for edge in edges.edges() {
            let curve = match edge_curve(nodes, edge, cfg) {
                Ok(c) => c,
                Err(issue) => {
                    tracing::debug!(%issue, "edge dropped from scene");
                    issues.push(issue);
                    continue;
                }
            };
            let selected = ui.selected_edge.as_deref() == Some(edge.id.as_str());
            let view = EdgeView {
                id: edge.id.clone(),
                path: curve.path_data(),
                midpoint: curve.midpoint(),
                curve,
                timing: schedule.get(&edge.id).cloned(),
                selected,
                show_flow: !connecting,
                show_delete: connecting,
            };
            if selected {
                selected_view = Some(view);
            } else {
                views.push(view);
            }
        }
        views.extend(selected_view);

        let node_views = nodes
            .nodes()
            .iter()
            .map(|n| NodeView {
                id: n.id.clone(),
                position: n.position,
                size: node_extent(n, cfg.default_node_size),
                selected: ui.selected_node.as_deref() == Some(n.id.as_str()),
                content: renderer.render_node(n),
            })
            .collect();

        Self { edges: views, nodes: node_views, flow_period_secs: schedule.period_secs(), issues }
    }
}

// =============================================================
// PSEUDO-CODE EXPORT
// =============================================================

const PSEUDO_HEADER: &str = "// NEXUS FLOW GLOBAL PSEUDO CODE";

/// Renders each node as one `[TYPE] label = value` line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoCodeRenderer;

impl NodeRenderer for PseudoCodeRenderer {
    type Output = String;

    fn render_node(&self, node: &Node) -> String {
        let mut line = format!("[{}] {}", node.kind().as_str().to_uppercase(), node.data.label());
        match &node.data {
            NodeData::Input { value, .. } | NodeData::Process { value, .. } | NodeData::Output { value, .. } => {
                if let Some(v) = value {
                    let text = v.to_string();
                    if !text.is_empty() {
                        line.push_str(" = ");
                        line.push_str(&text);
                    }
                }
            }
            NodeData::Embed { embed_data, .. } => {
                let name = embed_data.as_ref().and_then(|e| e.file_name.as_deref()).filter(|n| !n.is_empty());
                line.push_str(&format!(" ({})", name.unwrap_or("...")));
            }
        }
        line
    }
}

impl PseudoCodeRenderer {
    /// Full export: every node line, then one `source --> target` line per
    /// edge whose endpoints exist.
    #[must_use]
    pub fn export(&self, nodes: &NodeLayoutStore, edges: &EdgeSet) -> String {
        let mut out = String::from(PSEUDO_HEADER);
        out.push_str("\n\n// --- NODES ---\n");
        for node in nodes.nodes() {
            out.push_str(&self.render_node(node));
            out.push('\n');
        }
        out.push_str("\n// --- CONNECTIONS ---\n");
        for edge in edges.edges() {
            if let (Some(s), Some(t)) = (nodes.get(&edge.source), nodes.get(&edge.target)) {
                out.push_str(s.data.label());
                out.push_str(" --> ");
                out.push_str(t.data.label());
                out.push('\n');
            }
        }
        out
    }
}
