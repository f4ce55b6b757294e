//! Conditions the engine absorbs instead of returning.
//!
//! Gesture handlers never fail. When one of them hits a bad reference, a
//! duplicate connection, or an out-of-range request, it degrades to a no-op or
//! a clamped value, logs a [`CanvasIssue`], and may surface it to the host as
//! [`crate::engine::Action::Diagnostic`].

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::model::{EdgeId, NodeId};

/// A condition that was handled internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasIssue {
    /// An edge refers to a missing node or an out-of-range handle.
    #[error("edge {edge_id} has an invalid reference: {reason}")]
    InvalidReference { edge_id: EdgeId, reason: String },

    /// A connection with the same endpoints already exists; nothing was created.
    #[error("duplicate connection {source_id}:{source_handle} -> {target_id}:{target_handle}")]
    DuplicateConnection { source_id: NodeId, source_handle: u32, target_id: NodeId, target_handle: u32 },

    /// A request was outside configured bounds and was clamped.
    #[error("{what} clamped from {requested} to {applied}")]
    ClampedInput { what: &'static str, requested: f64, applied: f64 },

    /// A snapshot failed to load; canvas state was left unchanged.
    #[error("snapshot rejected: {reason}")]
    MalformedSnapshot { reason: String },
}
