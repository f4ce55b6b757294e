use super::*;

#[test]
fn invalid_reference_display() {
    let issue = CanvasIssue::InvalidReference { edge_id: "e1".into(), reason: "missing target node b".into() };
    assert_eq!(issue.to_string(), "edge e1 has an invalid reference: missing target node b");
}

#[test]
fn duplicate_connection_display() {
    let issue = CanvasIssue::DuplicateConnection {
        source_id: "a".into(),
        source_handle: 0,
        target_id: "b".into(),
        target_handle: 2,
    };
    assert_eq!(issue.to_string(), "duplicate connection a:0 -> b:2");
}

#[test]
fn clamped_input_display() {
    let issue = CanvasIssue::ClampedInput { what: "node width", requested: 10.0, applied: 200.0 };
    assert_eq!(issue.to_string(), "node width clamped from 10 to 200");
}

#[test]
fn malformed_snapshot_display() {
    let issue = CanvasIssue::MalformedSnapshot { reason: "missing field `edges`".into() };
    assert_eq!(issue.to_string(), "snapshot rejected: missing field `edges`");
}
