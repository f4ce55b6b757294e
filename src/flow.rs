//! Flow animation scheduling.
//!
//! Each edge animates a packet travelling from source to target. To make a
//! multi-hop path read as a wave, an edge's animation is delayed by the
//! longest-path depth of its source node. Depths come from bounded
//! relaxation, so cyclic graphs saturate instead of looping forever.
//!
//! Nothing here feeds back into the graph; the schedule is cosmetic.

#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

use std::collections::HashMap;

use crate::model::{Edge, EdgeId, Node, NodeId};

/// Longest-path depth per node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDepths {
    depths: HashMap<NodeId, u32>,
    passes: usize,
}

impl NodeDepths {
    /// Depth of `id`, or `None` for an unknown node.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<u32> {
        self.depths.get(id).copied()
    }

    /// Relaxation passes run, including the final pass that found no change.
    #[must_use]
    pub fn passes(&self) -> usize {
        self.passes
    }
}

/// Relax `depth(v) = max(depth(v), depth(u) + 1)` over every edge `u -> v`.
///
/// Runs at most `nodes.len() + 1` passes and stops early once a pass changes
/// nothing. Edges with an endpoint outside `nodes` are skipped.
#[must_use]
pub fn node_depths(nodes: &[Node], edges: &[Edge]) -> NodeDepths {
    let index: HashMap<&str, usize> = nodes.iter().enumerate().map(|(i, n)| (n.id.as_str(), i)).collect();
    let links: Vec<(usize, usize)> = edges
        .iter()
        .filter_map(|e| Some((*index.get(e.source.as_str())?, *index.get(e.target.as_str())?)))
        .collect();

    let mut depth = vec![0u32; nodes.len()];
    let max_passes = nodes.len() + 1;
    let mut passes = 0;
    while passes < max_passes {
        passes += 1;
        let mut changed = false;
        for &(u, v) in &links {
            let candidate = depth[u].saturating_add(1);
            if candidate > depth[v] {
                depth[v] = candidate;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    if passes == max_passes && !links.is_empty() {
        tracing::trace!(passes, "flow depth relaxation hit the pass cap");
    }

    NodeDepths {
        depths: nodes.iter().map(|n| n.id.clone()).zip(depth).collect(),
        passes,
    }
}

/// Animation timing for one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeTiming {
    pub edge_id: EdgeId,
    /// Depth of the edge's source node.
    pub depth: u32,
    /// Seconds before the first packet departs.
    pub delay_secs: f64,
    /// Seconds between packets.
    pub period_secs: f64,
}

/// Timings for every edge whose endpoints resolve.
///
/// The shared period is `max(max_depth, 1) * cycle_secs`: a flat graph still
/// repeats once per cycle instead of getting a zero period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowSchedule {
    timings: Vec<EdgeTiming>,
    max_depth: u32,
    period_secs: f64,
}

impl FlowSchedule {
    /// Compute delays and the shared repeat period.
    ///
    /// The period is `max_depth * cycle_secs`, floored at one cycle so a graph
    /// whose edges all start at depth zero still repeats.
    #[must_use]
    pub fn compute(nodes: &[Node], edges: &[Edge], cycle_secs: f64) -> Self {
        let depths = node_depths(nodes, edges);
        let resolved: Vec<(&Edge, u32)> = edges
            .iter()
            .filter(|e| depths.get(&e.target).is_some())
            .filter_map(|e| Some((e, depths.get(&e.source)?)))
            .collect();
        let max_depth = resolved.iter().map(|(_, d)| *d).max().unwrap_or(0);
        let period_secs = f64::from(max_depth.max(1)) * cycle_secs;
        let timings = resolved
            .into_iter()
            .map(|(e, depth)| EdgeTiming {
                edge_id: e.id.clone(),
                depth,
                delay_secs: f64::from(depth) * cycle_secs,
                period_secs,
            })
            .collect();
        Self { timings, max_depth, period_secs }
    }

    #[must_use]
    pub fn timings(&self) -> &[EdgeTiming] {
        &self.timings
    }

    #[must_use]
    pub fn get(&self, edge_id: &str) -> Option<&EdgeTiming> {
        self.timings.iter().find(|t| t.edge_id == edge_id)
    }

    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[must_use]
    pub fn period_secs(&self) -> f64 {
        self.period_secs
    }
}
