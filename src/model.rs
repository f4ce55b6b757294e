//! Graph data model: nodes, edges, handles, and node content.
//!
//! These are the records carried in snapshots and held by the stores. Field
//! names on the wire are camelCase (`sourceHandle`, `embedData`) so documents
//! written by earlier versions of the editor load unchanged.
//!
//! Node content is a tagged variant keyed by `type`. The engine only inspects
//! it to decide resizability; everything else about content belongs to the
//! host's renderer (see [`crate::render::NodeRenderer`]).

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::viewport::Point;

/// Unique identifier for a node.
pub type NodeId = String;

/// Unique identifier for an edge.
pub type EdgeId = String;

/// Side of a node a handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Unit vector pointing away from the node on this side (screen y grows downward).
    #[must_use]
    pub fn outward(self) -> (f64, f64) {
        match self {
            Side::Top => (0.0, -1.0),
            Side::Right => (1.0, 0.0),
            Side::Bottom => (0.0, 1.0),
            Side::Left => (-1.0, 0.0),
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

/// Handle counts per side. Absent sides have zero handles.
///
/// Sides are kept as written so a snapshot that omits a side round-trips
/// without gaining an explicit `0`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handles(BTreeMap<Side, u32>);

impl Handles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` handles on every side.
    #[must_use]
    pub fn uniform(count: u32) -> Self {
        Self(Side::ALL.iter().map(|&s| (s, count)).collect())
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, side: Side, count: u32) -> Self {
        self.0.insert(side, count);
        self
    }

    /// Number of handles on `side` (zero when absent).
    #[must_use]
    pub fn count(&self, side: Side) -> u32 {
        self.0.get(&side).copied().unwrap_or(0)
    }

    /// Whether `index` addresses an existing handle on `side`.
    #[must_use]
    pub fn has(&self, side: Side, index: u32) -> bool {
        index < self.count(side)
    }

    /// Total handle count across all sides.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

/// The kind of a node, without its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Input,
    Process,
    Output,
    /// Media embed; the only resizable kind.
    Embed,
}

impl NodeKind {
    /// Whether explicit resize gestures apply to this kind.
    #[must_use]
    pub fn is_resizable(self) -> bool {
        matches!(self, NodeKind::Embed)
    }

    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Input => "input",
            NodeKind::Process => "process",
            NodeKind::Output => "output",
            NodeKind::Embed => "embed",
        }
    }

    /// Content given to a freshly added node of this kind.
    #[must_use]
    pub fn default_data(self) -> NodeData {
        match self {
            NodeKind::Input => NodeData::Input { label: "New input".into(), value: None },
            NodeKind::Process => NodeData::Process { label: "New process".into(), value: None },
            NodeKind::Output => NodeData::Output { label: "New output".into(), value: None },
            NodeKind::Embed => NodeData::Embed { label: "New Embed".into(), embed_data: None },
        }
    }
}

/// Scalar payload of an input/process/output node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for NodeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeValue::Number(n) => write!(f, "{n}"),
            NodeValue::Text(s) => f.write_str(s),
        }
    }
}

/// Media attached to an embed node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedData {
    pub mime_type: String,
    pub data_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Node content, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeData {
    Input {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<NodeValue>,
    },
    Process {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<NodeValue>,
    },
    Output {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<NodeValue>,
    },
    Embed {
        label: String,
        #[serde(rename = "embedData", default, skip_serializing_if = "Option::is_none")]
        embed_data: Option<EmbedData>,
    },
}

impl NodeData {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Input { .. } => NodeKind::Input,
            NodeData::Process { .. } => NodeKind::Process,
            NodeData::Output { .. } => NodeKind::Output,
            NodeData::Embed { .. } => NodeKind::Embed,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            NodeData::Input { label, .. }
            | NodeData::Process { label, .. }
            | NodeData::Output { label, .. }
            | NodeData::Embed { label, .. } => label,
        }
    }
}

/// Sparse update for [`NodeData`]. Fields that do not apply to the node's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDataPatch {
    pub label: Option<String>,
    /// `Some(None)` clears the value.
    pub value: Option<Option<NodeValue>>,
    /// `Some(None)` detaches the media.
    pub embed_data: Option<Option<EmbedData>>,
}

impl NodeDataPatch {
    /// Merge into `data`. Returns whether anything changed.
    pub fn apply(&self, data: &mut NodeData) -> bool {
        let before = data.clone();
        match data {
            NodeData::Input { label, value }
            | NodeData::Process { label, value }
            | NodeData::Output { label, value } => {
                if let Some(l) = &self.label {
                    label.clone_from(l);
                }
                if let Some(v) = &self.value {
                    value.clone_from(v);
                }
            }
            NodeData::Embed { label, embed_data } => {
                if let Some(l) = &self.label {
                    label.clone_from(l);
                }
                if let Some(e) = &self.embed_data {
                    embed_data.clone_from(e);
                }
            }
        }
        *data != before
    }
}

/// A node as stored in the layout store and in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Top-left corner in canvas space.
    pub position: Point,
    pub data: NodeData,
    #[serde(default)]
    pub handles: Handles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Node {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// Width and height, substituting `default` for whichever is unset.
    #[must_use]
    pub fn size_or(&self, default: (f64, f64)) -> (f64, f64) {
        (self.width.unwrap_or(default.0), self.height.unwrap_or(default.1))
    }

    /// Whether the canvas point lies inside the node's box.
    #[must_use]
    pub fn contains(&self, p: Point, default_size: (f64, f64)) -> bool {
        let (w, h) = self.size_or(default_size);
        p.x >= self.position.x && p.x <= self.position.x + w && p.y >= self.position.y && p.y <= self.position.y + h
    }
}

/// One handle on one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandleRef {
    pub node_id: NodeId,
    pub side: Side,
    pub index: u32,
}

impl HandleRef {
    #[must_use]
    pub fn new(node_id: impl Into<NodeId>, side: Side, index: u32) -> Self {
        Self { node_id: node_id.into(), side, index }
    }
}

/// Identity of a connection for duplicate detection.
///
/// Sides are deliberately not part of the key: two edges between the same
/// handle indices are duplicates regardless of which side was clicked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub source: NodeId,
    pub source_handle: u32,
    pub target: NodeId,
    pub target_handle: u32,
}

/// A directed connection between two node handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub source_handle: u32,
    pub source_side: Side,
    pub target: NodeId,
    pub target_handle: u32,
    pub target_side: Side,
}

impl Edge {
    #[must_use]
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            source: self.source.clone(),
            source_handle: self.source_handle,
            target: self.target.clone(),
            target_handle: self.target_handle,
        }
    }

    /// Whether `node_id` is this edge's source or target.
    #[must_use]
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
