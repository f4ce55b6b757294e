#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_constants() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.zoom.min, 0.1);
    assert_eq!(cfg.zoom.max, 5.0);
    assert_eq!(cfg.wheel_zoom_sensitivity, 0.001);
    assert_eq!(cfg.click_epsilon_px, 5.0);
    assert_eq!(cfg.min_node_size, (200.0, 150.0));
    assert_eq!(cfg.default_node_size, (200.0, 100.0));
    assert_eq!(cfg.default_embed_size, (400.0, 300.0));
    assert_eq!(cfg.handle_diameter, 14.0);
    assert_eq!(cfg.handle_gap, 12.0);
    assert_eq!(cfg.curvature, 50.0);
    assert_eq!(cfg.edge_hit_width_px, 20.0);
    assert_eq!(cfg.flow_cycle_secs, 2.0);
}

#[test]
fn defaults_validate() {
    assert_eq!(EngineConfig::default().validate(), Ok(()));
}

#[test]
fn no_overrides_gives_defaults() {
    let cfg = EngineConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn overrides_are_applied() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[
        ("FLOWCANVAS_ZOOM_MIN", "0.25"),
        ("FLOWCANVAS_ZOOM_MAX", " 3 "),
        ("FLOWCANVAS_CURVATURE", "80"),
        ("FLOWCANVAS_FLOW_CYCLE_SECS", "1.5"),
    ]))
    .unwrap();
    assert_eq!(cfg.zoom.min, 0.25);
    assert_eq!(cfg.zoom.max, 3.0);
    assert_eq!(cfg.curvature, 80.0);
    assert_eq!(cfg.flow_cycle_secs, 1.5);
    assert_eq!(cfg.click_epsilon_px, 5.0);
}

#[test]
fn unparsable_value_is_parse_error() {
    let err = EngineConfig::from_lookup(lookup_from(&[("FLOWCANVAS_WHEEL_SENSITIVITY", "fast")])).unwrap_err();
    assert_eq!(err, ConfigError::Parse { key: "FLOWCANVAS_WHEEL_SENSITIVITY".into(), value: "fast".into() });
}

#[test]
fn non_finite_value_is_parse_error() {
    let err = EngineConfig::from_lookup(lookup_from(&[("FLOWCANVAS_CURVATURE", "inf")])).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn inverted_zoom_bounds_rejected() {
    let err = EngineConfig::from_lookup(lookup_from(&[("FLOWCANVAS_ZOOM_MIN", "4"), ("FLOWCANVAS_ZOOM_MAX", "2")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "FLOWCANVAS_ZOOM_MAX", .. }));
}

#[test]
fn non_positive_zoom_min_rejected() {
    let err = EngineConfig::from_lookup(lookup_from(&[("FLOWCANVAS_ZOOM_MIN", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "FLOWCANVAS_ZOOM_MIN", .. }));
}

#[test]
fn negative_click_epsilon_rejected() {
    let err = EngineConfig::from_lookup(lookup_from(&[("FLOWCANVAS_CLICK_EPSILON_PX", "-1")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "FLOWCANVAS_CLICK_EPSILON_PX", .. }));
}

#[test]
fn zero_flow_cycle_rejected() {
    let err = EngineConfig::from_lookup(lookup_from(&[("FLOWCANVAS_FLOW_CYCLE_SECS", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "FLOWCANVAS_FLOW_CYCLE_SECS", .. }));
}

#[test]
fn error_messages_name_the_key() {
    let err = ConfigError::Parse { key: "FLOWCANVAS_ZOOM_MIN".into(), value: "x".into() };
    assert_eq!(err.to_string(), "config parse failed: FLOWCANVAS_ZOOM_MIN=x");
}
