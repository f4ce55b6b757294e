//! Snapshot document: the `{version, nodes, edges, viewport}` interchange shape.
//!
//! Loading validates shape and identity before anything is replaced, so a
//! rejected document never leaves the canvas half-loaded. Saving emits every
//! field the document was loaded with; optional fields that were absent stay
//! absent.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CanvasIssue;
use crate::model::{Edge, EdgeId, Node, NodeId};
use crate::viewport::Viewport;

/// Version string written by [`Snapshot::new`].
pub const SNAPSHOT_VERSION: &str = "1.1";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(NodeId),
    #[error("duplicate edge id: {0}")]
    DuplicateEdgeId(EdgeId),
    #[error("non-finite {field} on {owner}")]
    NonFinite { field: &'static str, owner: String },
}

impl SnapshotError {
    /// The diagnostic surfaced to the host when a load is rejected.
    #[must_use]
    pub fn to_issue(&self) -> CanvasIssue {
        CanvasIssue::MalformedSnapshot { reason: self.to_string() }
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

fn default_version() -> String {
    SNAPSHOT_VERSION.to_owned()
}

/// A full canvas document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Absent in some older documents; loading one keeps the current viewport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl Snapshot {
    #[must_use]
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, viewport: Viewport) -> Self {
        Self { version: default_version(), nodes, edges, viewport: Some(viewport) }
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] when the text is not a snapshot-shaped
    /// object, or the first identity/finiteness problem found by [`Snapshot::validate`].
    pub fn parse(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check node/edge id uniqueness and that every coordinate is finite.
    ///
    /// Edges pointing at missing nodes or handles are accepted here; they are
    /// dropped when the scene is assembled.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut node_ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(SnapshotError::DuplicateNodeId(node.id.clone()));
            }
            if !node.position.is_finite() {
                return Err(SnapshotError::NonFinite { field: "position", owner: node.id.clone() });
            }
            let size_ok = [node.width, node.height].into_iter().flatten().all(f64::is_finite);
            if !size_ok {
                return Err(SnapshotError::NonFinite { field: "size", owner: node.id.clone() });
            }
        }

        let mut edge_ids = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(SnapshotError::DuplicateEdgeId(edge.id.clone()));
            }
        }

        if let Some(vp) = &self.viewport {
            if ![vp.x, vp.y, vp.zoom].iter().all(|v| v.is_finite()) {
                return Err(SnapshotError::NonFinite { field: "viewport", owner: "document".into() });
            }
        }
        Ok(())
    }

    /// Pretty-printed JSON with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
