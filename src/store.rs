//! In-memory node and edge stores.
//!
//! [`NodeLayoutStore`] owns node geometry (position, size, handles) and the
//! host-owned `data`. [`EdgeSet`] owns the edges and enforces the
//! one-edge-per-endpoint-tuple rule. Both keep insertion order so a snapshot
//! saved after a load lists records in the order they arrived.
//!
//! Tool-mode and read-only gating live in [`crate::engine::EngineCore`]; the
//! methods here are the unconditional primitives.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use crate::error::CanvasIssue;
use crate::model::{Edge, EdgeKey, Node, NodeDataPatch, NodeId};
use crate::viewport::Point;

/// Outcome of a resize request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resized {
    /// Size actually stored after clamping.
    pub applied: (f64, f64),
    /// Whether either dimension was raised to the minimum.
    pub clamped: bool,
}

/// Canonical set of nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeLayoutStore {
    nodes: Vec<Node>,
    /// Latest measured size per node, waiting for [`NodeLayoutStore::flush_auto_size`].
    pending_sizes: HashMap<NodeId, (f64, f64)>,
}

impl NodeLayoutStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every node. Pending size reports are dropped.
    pub fn load(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
        self.pending_sizes.clear();
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.pending_sizes.clear();
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node. Returns false (and stores nothing) if the id is taken.
    pub fn insert(&mut self, node: Node) -> bool {
        if self.contains(&node.id) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Remove a node by id, returning it if it was present.
    ///
    /// Edges are not touched here; callers cascade through [`EdgeSet::remove_touching`].
    pub fn remove(&mut self, id: &str) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        self.pending_sizes.remove(id);
        Some(self.nodes.remove(idx))
    }

    /// Set a node's top-left position. Returns whether the node exists and moved.
    pub fn move_node(&mut self, id: &str, position: Point) -> bool {
        if !position.is_finite() {
            return false;
        }
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        if node.position == position {
            return false;
        }
        node.position = position;
        true
    }

    /// Set an explicit size, raising each dimension to at least `min`.
    ///
    /// Returns `None` when the node is missing, not resizable, or the request is non-finite.
    pub fn resize_node(&mut self, id: &str, width: f64, height: f64, min: (f64, f64)) -> Option<Resized> {
        if !width.is_finite() || !height.is_finite() {
            return None;
        }
        let node = self.get_mut(id)?;
        if !node.kind().is_resizable() {
            return None;
        }
        let applied = (width.max(min.0), height.max(min.1));
        node.width = Some(applied.0);
        node.height = Some(applied.1);
        Some(Resized { applied, clamped: applied != (width, height) })
    }

    /// Merge a content patch. Returns whether anything changed.
    pub fn update_data(&mut self, id: &str, patch: &NodeDataPatch) -> bool {
        self.get_mut(id).is_some_and(|node| patch.apply(&mut node.data))
    }

    /// Record a measured content size without touching the node.
    ///
    /// Measurement callbacks call this; the stored size only changes on the
    /// next [`NodeLayoutStore::flush_auto_size`], so a resize can never feed
    /// back into the measurement that caused it. A later report for the same
    /// node replaces an earlier one.
    pub fn observe_size(&mut self, id: &str, width: f64, height: f64) {
        self.pending_sizes.insert(id.to_owned(), (width, height));
    }

    #[must_use]
    pub fn has_pending_sizes(&self) -> bool {
        !self.pending_sizes.is_empty()
    }

    /// Apply queued measurements that differ from the stored size by more than `tolerance`.
    ///
    /// Reports for deleted nodes and non-positive measurements are dropped.
    /// Returns the ids of nodes whose size changed, in store order.
    pub fn flush_auto_size(&mut self, tolerance: f64) -> Vec<NodeId> {
        let mut pending = std::mem::take(&mut self.pending_sizes);
        let mut changed = Vec::new();
        for node in &mut self.nodes {
            let Some((w, h)) = pending.remove(&node.id) else {
                continue;
            };
            if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
                continue;
            }
            let dw = (node.width.unwrap_or(0.0) - w).abs();
            let dh = (node.height.unwrap_or(0.0) - h).abs();
            if dw > tolerance || dh > tolerance {
                node.width = Some(w);
                node.height = Some(h);
                changed.push(node.id.clone());
            }
        }
        for id in pending.keys() {
            tracing::debug!(node_id = %id, "dropping size report for unknown node");
        }
        changed
    }

    /// Resolve both endpoints of `edge`, checking handle indices.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasIssue::InvalidReference`] for a missing node, a
    /// self-loop, or a handle index beyond the side's count.
    pub fn endpoints(&self, edge: &Edge) -> Result<(&Node, &Node), CanvasIssue> {
        let invalid = |reason: String| CanvasIssue::InvalidReference { edge_id: edge.id.clone(), reason };
        if edge.source == edge.target {
            return Err(invalid(format!("source and target are both {}", edge.source)));
        }
        let source = self.get(&edge.source).ok_or_else(|| invalid(format!("missing source node {}", edge.source)))?;
        let target = self.get(&edge.target).ok_or_else(|| invalid(format!("missing target node {}", edge.target)))?;
        if !source.handles.has(edge.source_side, edge.source_handle) {
            return Err(invalid(format!(
                "source handle {} out of range on {} side",
                edge.source_handle,
                edge.source_side.as_str()
            )));
        }
        if !target.handles.has(edge.target_side, edge.target_handle) {
            return Err(invalid(format!(
                "target handle {} out of range on {} side",
                edge.target_handle,
                edge.target_side.as_str()
            )));
        }
        Ok((source, target))
    }
}

/// Canonical set of edges.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    edges: Vec<Edge>,
}

impl EdgeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every edge.
    pub fn load(&mut self, edges: Vec<Edge>) {
        self.edges = edges;
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether an edge with the same endpoint tuple exists.
    #[must_use]
    pub fn contains_key(&self, key: &EdgeKey) -> bool {
        self.edges.iter().any(|e| e.key() == *key)
    }

    /// Append an edge unless its id or endpoint tuple is already present.
    pub fn insert(&mut self, edge: Edge) -> bool {
        if self.get(&edge.id).is_some() || self.contains_key(&edge.key()) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Remove an edge by id.
    pub fn remove(&mut self, id: &str) -> Option<Edge> {
        let idx = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(idx))
    }

    /// Remove every edge that has `node_id` as source or target, returning them.
    pub fn remove_touching(&mut self, node_id: &str) -> Vec<Edge> {
        let (removed, kept): (Vec<Edge>, Vec<Edge>) =
            std::mem::take(&mut self.edges).into_iter().partition(|e| e.touches(node_id));
        self.edges = kept;
        removed
    }
}
