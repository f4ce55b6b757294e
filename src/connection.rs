//! Handle-to-handle connection state machine.
//!
//! In the connect tool, the first handle click arms a pending connection at
//! that handle's anchor. The next handle click either aborts (same node) or
//! commits an edge (different node), and the machine returns to `NoPending`
//! whatever the outcome. Duplicate endpoint tuples and self-loops are never
//! created.

#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

use crate::config::EngineConfig;
use crate::error::CanvasIssue;
use crate::geometry::handle_anchor;
use crate::ids::IdGenerator;
use crate::input::Tool;
use crate::model::{Edge, EdgeKey, HandleRef, NodeId, Side};
use crate::store::{EdgeSet, NodeLayoutStore};
use crate::viewport::Point;

/// The source half of an edge being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConnection {
    pub source_node_id: NodeId,
    pub source_handle: u32,
    pub source_side: Side,
    /// Canvas position of the source handle, where the preview line starts.
    pub start_pos: Point,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConnectionState {
    #[default]
    NoPending,
    Pending(PendingConnection),
}

/// Result of a handle click.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectOutcome {
    /// Wrong tool, or the handle does not exist.
    Ignored,
    /// A pending connection was armed.
    Started,
    /// Second click landed on the source node; nothing was created.
    Aborted,
    /// A new edge was added.
    Created(Edge),
    /// An identical connection already exists; nothing was created.
    Duplicate(CanvasIssue),
}

/// See the module docs.
#[derive(Debug, Clone, Default)]
pub struct ConnectionEngine {
    state: ConnectionState,
}

impl ConnectionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingConnection> {
        match &self.state {
            ConnectionState::Pending(p) => Some(p),
            ConnectionState::NoPending => None,
        }
    }

    /// Drop any pending connection. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        matches!(std::mem::take(&mut self.state), ConnectionState::Pending(_))
    }

    /// Feed a click on a handle.
    pub fn handle_click(
        &mut self,
        tool: Tool,
        handle: &HandleRef,
        nodes: &NodeLayoutStore,
        edges: &mut EdgeSet,
        ids: &mut IdGenerator,
        cfg: &EngineConfig,
    ) -> ConnectOutcome {
        if !tool.connects() {
            return ConnectOutcome::Ignored;
        }
        let HandleRef { node_id, side, index } = handle;
        let (side, index) = (*side, *index);
        let Some(node) = nodes.get(node_id) else {
            tracing::debug!(node_id = %node_id, "handle click on unknown node");
            return ConnectOutcome::Ignored;
        };
        if !node.handles.has(side, index) {
            tracing::debug!(node_id = %node_id, side = side.as_str(), index, "handle click on missing handle");
            return ConnectOutcome::Ignored;
        }

        let pending = match std::mem::take(&mut self.state) {
            ConnectionState::NoPending => {
                self.state = ConnectionState::Pending(PendingConnection {
                    source_node_id: node.id.clone(),
                    source_handle: index,
                    source_side: side,
                    start_pos: handle_anchor(node, side, index, cfg),
                });
                return ConnectOutcome::Started;
            }
            ConnectionState::Pending(p) => p,
        };

        if pending.source_node_id == *node_id {
            return ConnectOutcome::Aborted;
        }

        let key = EdgeKey {
            source: pending.source_node_id.clone(),
            source_handle: pending.source_handle,
            target: node.id.clone(),
            target_handle: index,
        };
        if edges.contains_key(&key) {
            let issue = CanvasIssue::DuplicateConnection {
                source_id: key.source,
                source_handle: key.source_handle,
                target_id: key.target,
                target_handle: key.target_handle,
            };
            tracing::debug!(%issue, "connection ignored");
            return ConnectOutcome::Duplicate(issue);
        }

        let edge = Edge {
            id: ids.fresh(|id| edges.get(id).is_some()),
            source: pending.source_node_id,
            source_handle: pending.source_handle,
            source_side: pending.source_side,
            target: node.id.clone(),
            target_handle: index,
            target_side: side,
        };
        if edges.insert(edge.clone()) {
            ConnectOutcome::Created(edge)
        } else {
            ConnectOutcome::Ignored
        }
    }

    /// Remove an edge by id. Only the connect tool deletes edges; pending state is untouched.
    pub fn delete_edge(tool: Tool, edge_id: &str, edges: &mut EdgeSet) -> Option<Edge> {
        if !tool.connects() {
            return None;
        }
        edges.remove(edge_id)
    }
}
