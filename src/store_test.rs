#![allow(clippy::float_cmp)]

use super::*;
use crate::model::{Handles, NodeData, NodeKind, NodeValue, Side};

fn node(id: &str, kind: NodeKind) -> Node {
    Node {
        id: id.into(),
        position: Point::new(0.0, 0.0),
        data: kind.default_data(),
        handles: Handles::uniform(1),
        width: None,
        height: None,
    }
}

fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge {
        id: id.into(),
        source: source.into(),
        source_handle: 0,
        source_side: Side::Right,
        target: target.into(),
        target_handle: 0,
        target_side: Side::Left,
    }
}

fn store_with(ids: &[&str]) -> NodeLayoutStore {
    let mut store = NodeLayoutStore::new();
    for id in ids {
        assert!(store.insert(node(id, NodeKind::Process)));
    }
    store
}

// =============================================================
// NodeLayoutStore basics
// =============================================================

#[test]
fn insert_rejects_duplicate_id() {
    let mut store = store_with(&["a"]);
    assert!(!store.insert(node("a", NodeKind::Input)));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a").unwrap().kind(), NodeKind::Process);
}

#[test]
fn insertion_order_is_kept() {
    let store = store_with(&["c", "a", "b"]);
    let ids: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["c", "a", "b"]);
}

#[test]
fn remove_returns_node() {
    let mut store = store_with(&["a", "b"]);
    assert_eq!(store.remove("a").unwrap().id, "a");
    assert!(store.remove("a").is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn load_replaces_everything() {
    let mut store = store_with(&["a", "b"]);
    store.load(vec![node("z", NodeKind::Output)]);
    assert_eq!(store.len(), 1);
    assert!(store.contains("z"));
    assert!(!store.contains("a"));
}

// =============================================================
// move / resize / data
// =============================================================

#[test]
fn move_node_sets_position() {
    let mut store = store_with(&["a"]);
    assert!(store.move_node("a", Point::new(12.0, -4.0)));
    assert_eq!(store.get("a").unwrap().position, Point::new(12.0, -4.0));
}

#[test]
fn move_node_same_position_reports_no_change() {
    let mut store = store_with(&["a"]);
    assert!(!store.move_node("a", Point::new(0.0, 0.0)));
}

#[test]
fn move_missing_node_is_noop() {
    let mut store = store_with(&["a"]);
    assert!(!store.move_node("ghost", Point::new(1.0, 1.0)));
}

#[test]
fn move_rejects_non_finite() {
    let mut store = store_with(&["a"]);
    assert!(!store.move_node("a", Point::new(f64::NAN, 1.0)));
    assert_eq!(store.get("a").unwrap().position, Point::new(0.0, 0.0));
}

#[test]
fn resize_embed_clamps_to_minimum() {
    let mut store = NodeLayoutStore::new();
    store.insert(node("m", NodeKind::Embed));
    let r = store.resize_node("m", 50.0, 400.0, (200.0, 150.0)).unwrap();
    assert_eq!(r.applied, (200.0, 400.0));
    assert!(r.clamped);
    let n = store.get("m").unwrap();
    assert_eq!((n.width, n.height), (Some(200.0), Some(400.0)));
}

#[test]
fn resize_within_bounds_is_not_clamped() {
    let mut store = NodeLayoutStore::new();
    store.insert(node("m", NodeKind::Embed));
    let r = store.resize_node("m", 640.0, 480.0, (200.0, 150.0)).unwrap();
    assert_eq!(r, Resized { applied: (640.0, 480.0), clamped: false });
}

#[test]
fn resize_non_resizable_kind_is_ignored() {
    let mut store = store_with(&["p"]);
    assert!(store.resize_node("p", 640.0, 480.0, (200.0, 150.0)).is_none());
    assert_eq!(store.get("p").unwrap().width, None);
}

#[test]
fn update_data_applies_patch() {
    let mut store = store_with(&["p"]);
    let patch = NodeDataPatch { value: Some(Some(NodeValue::Text("x".into()))), ..Default::default() };
    assert!(store.update_data("p", &patch));
    assert_eq!(
        store.get("p").unwrap().data,
        NodeData::Process { label: "New process".into(), value: Some(NodeValue::Text("x".into())) }
    );
    assert!(!store.update_data("ghost", &patch));
}

// =============================================================
// Auto-size
// =============================================================

#[test]
fn observe_size_does_not_apply_immediately() {
    let mut store = store_with(&["a"]);
    store.observe_size("a", 240.0, 120.0);
    assert_eq!(store.get("a").unwrap().width, None);
    assert!(store.has_pending_sizes());
}

#[test]
fn flush_applies_changes_beyond_tolerance() {
    let mut store = store_with(&["a"]);
    store.observe_size("a", 240.0, 120.0);
    assert_eq!(store.flush_auto_size(1.0), vec!["a".to_owned()]);
    let n = store.get("a").unwrap();
    assert_eq!((n.width, n.height), (Some(240.0), Some(120.0)));
    assert!(!store.has_pending_sizes());
}

#[test]
fn flush_ignores_sub_pixel_jitter() {
    let mut store = store_with(&["a"]);
    store.observe_size("a", 240.0, 120.0);
    store.flush_auto_size(1.0);
    store.observe_size("a", 240.8, 119.5);
    assert!(store.flush_auto_size(1.0).is_empty());
    assert_eq!(store.get("a").unwrap().width, Some(240.0));
}

#[test]
fn flush_uses_latest_report() {
    let mut store = store_with(&["a"]);
    store.observe_size("a", 240.0, 120.0);
    store.observe_size("a", 300.0, 90.0);
    store.flush_auto_size(1.0);
    assert_eq!(store.get("a").unwrap().width, Some(300.0));
}

#[test]
fn flush_drops_reports_for_removed_nodes() {
    let mut store = store_with(&["a"]);
    store.observe_size("ghost", 240.0, 120.0);
    assert!(store.flush_auto_size(1.0).is_empty());
    assert!(!store.has_pending_sizes());
}

#[test]
fn flush_ignores_zero_measurements() {
    let mut store = store_with(&["a"]);
    store.observe_size("a", 0.0, 0.0);
    assert!(store.flush_auto_size(1.0).is_empty());
}

// =============================================================
// endpoints
// =============================================================

#[test]
fn endpoints_resolve_valid_edge() {
    let store = store_with(&["a", "b"]);
    let (s, t) = store.endpoints(&edge("e", "a", "b")).unwrap();
    assert_eq!((s.id.as_str(), t.id.as_str()), ("a", "b"));
}

#[test]
fn endpoints_reject_missing_node() {
    let store = store_with(&["a"]);
    let err = store.endpoints(&edge("e", "a", "b")).unwrap_err();
    assert!(matches!(err, CanvasIssue::InvalidReference { ref edge_id, .. } if edge_id == "e"));
}

#[test]
fn endpoints_reject_out_of_range_handle() {
    let store = store_with(&["a", "b"]);
    let mut e = edge("e", "a", "b");
    e.target_handle = 1;
    assert!(store.endpoints(&e).is_err());
}

#[test]
fn endpoints_reject_self_loop() {
    let store = store_with(&["a"]);
    assert!(store.endpoints(&edge("e", "a", "a")).is_err());
}

// =============================================================
// EdgeSet
// =============================================================

#[test]
fn edge_insert_rejects_duplicate_tuple() {
    let mut edges = EdgeSet::new();
    assert!(edges.insert(edge("e1", "a", "b")));
    let mut dup = edge("e2", "a", "b");
    dup.source_side = Side::Bottom;
    assert!(!edges.insert(dup));
    assert_eq!(edges.len(), 1);
}

#[test]
fn edge_insert_rejects_duplicate_id() {
    let mut edges = EdgeSet::new();
    edges.insert(edge("e1", "a", "b"));
    assert!(!edges.insert(edge("e1", "b", "c")));
}

#[test]
fn reverse_direction_is_not_a_duplicate() {
    let mut edges = EdgeSet::new();
    edges.insert(edge("e1", "a", "b"));
    assert!(edges.insert(edge("e2", "b", "a")));
}

#[test]
fn remove_touching_removes_exactly_incident_edges() {
    let mut edges = EdgeSet::new();
    edges.load(vec![
        edge("ab", "a", "b"),
        edge("bc", "b", "c"),
        edge("ca", "c", "a"),
        edge("cd", "c", "d"),
        edge("de", "d", "e"),
    ]);
    let removed: Vec<String> = edges.remove_touching("a").into_iter().map(|e| e.id).collect();
    assert_eq!(removed, ["ab", "ca"]);
    let kept: Vec<&str> = edges.edges().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(kept, ["bc", "cd", "de"]);
}

#[test]
fn edge_remove_by_id() {
    let mut edges = EdgeSet::new();
    edges.insert(edge("e1", "a", "b"));
    assert_eq!(edges.remove("e1").unwrap().id, "e1");
    assert!(edges.is_empty());
    assert!(edges.remove("e1").is_none());
}
