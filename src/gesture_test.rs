#![allow(clippy::float_cmp)]

use super::*;
use crate::viewport::ZoomBounds;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn settings() -> RouterSettings {
    RouterSettings { click_epsilon_px: 5.0, wheel_zoom_sensitivity: 0.001 }
}

fn setup() -> (PointerGestureRouter, ViewportController) {
    (PointerGestureRouter::new(), ViewportController::new(ZoomBounds::default()))
}

const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

// =============================================================
// Entering pan
// =============================================================

#[test]
fn touch_press_starts_panning() {
    let (mut r, _) = setup();
    r.pointer_down(1, PointerSample::touch(10.0, 10.0), Button::Primary, Modifiers::default(), Tool::Select);
    assert_eq!(r.state(), GestureState::Panning { last: pt(10.0, 10.0) });
    assert!(r.is_active());
}

#[test]
fn mouse_press_in_select_tool_does_not_pan() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::mouse(10.0, 10.0), Button::Primary, Modifiers::default(), Tool::Select);
    assert_eq!(r.state(), GestureState::Idle);
    r.pointer_move(1, pt(60.0, 60.0), &mut vp, ORIGIN);
    assert_eq!(vp.live(), Viewport::default());
}

#[test]
fn pan_tool_middle_button_and_alt_drag_pan() {
    let cases = [
        (Button::Primary, Modifiers::default(), Tool::Pan),
        (Button::Middle, Modifiers::default(), Tool::Select),
        (Button::Primary, Modifiers { alt: true, ..Default::default() }, Tool::Connect),
    ];
    for (button, mods, tool) in cases {
        let (mut r, _) = setup();
        r.pointer_down(1, PointerSample::mouse(0.0, 0.0), button, mods, tool);
        assert!(matches!(r.state(), GestureState::Panning { .. }), "{button:?} {tool:?}");
    }
}

#[test]
fn secondary_button_does_not_pan() {
    let (mut r, _) = setup();
    r.pointer_down(1, PointerSample::mouse(0.0, 0.0), Button::Secondary, Modifiers::default(), Tool::Select);
    assert_eq!(r.state(), GestureState::Idle);
}

// =============================================================
// Panning and commit
// =============================================================

#[test]
fn panning_stages_until_release() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::touch(100.0, 100.0), Button::Primary, Modifiers::default(), Tool::Select);
    let ev = r.pointer_move(1, pt(130.0, 90.0), &mut vp, ORIGIN);
    assert!(ev.contains(&RouterEvent::ViewportMoved));
    assert_eq!(vp.live().pan(), pt(30.0, -10.0));
    assert_eq!(vp.committed(), Viewport::default());

    let ev = r.pointer_up(1, pt(130.0, 90.0), &mut vp, &settings());
    assert_eq!(ev, vec![RouterEvent::ViewportCommitted(Viewport::new(30.0, -10.0, 1.0))]);
    assert_eq!(vp.committed().pan(), pt(30.0, -10.0));
    assert_eq!(r.state(), GestureState::Idle);
    assert!(!r.is_active());
}

#[test]
fn committed_pan_is_sum_of_moves() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::touch(0.0, 0.0), Button::Primary, Modifiers::default(), Tool::Select);
    let path = [pt(3.0, 1.0), pt(-4.5, 7.0), pt(12.25, 2.0), pt(20.0, -8.0)];
    for p in path {
        r.pointer_move(1, p, &mut vp, ORIGIN);
    }
    r.pointer_up(1, pt(20.0, -8.0), &mut vp, &settings());
    assert!(approx_eq(vp.committed().x, 20.0));
    assert!(approx_eq(vp.committed().y, -8.0));
}

#[test]
fn cancel_of_unknown_pointer_is_noop() {
    let (mut r, mut vp) = setup();
    assert!(r.pointer_up(9, pt(0.0, 0.0), &mut vp, &settings()).is_empty());
}

// =============================================================
// Background click
// =============================================================

#[test]
fn short_press_is_background_click() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::mouse(50.0, 50.0), Button::Primary, Modifiers::default(), Tool::Select);
    let ev = r.pointer_up(1, pt(53.0, 52.0), &mut vp, &settings());
    assert_eq!(ev, vec![RouterEvent::BackgroundClick]);
}

#[test]
fn content_press_pans_but_never_clicks() {
    let (mut r, mut vp) = setup();
    r.pointer_down_on_content(1, PointerSample::mouse(50.0, 50.0), Button::Primary, Modifiers::default(), Tool::Pan);
    assert!(matches!(r.state(), GestureState::Panning { .. }));
    let ev = r.pointer_up(1, pt(50.0, 50.0), &mut vp, &settings());
    assert!(!ev.contains(&RouterEvent::BackgroundClick));
    assert_eq!(r.state(), GestureState::Idle);
}

#[test]
fn long_drag_is_not_a_click() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::mouse(50.0, 50.0), Button::Primary, Modifiers::default(), Tool::Pan);
    r.pointer_move(1, pt(80.0, 50.0), &mut vp, ORIGIN);
    let ev = r.pointer_up(1, pt(80.0, 50.0), &mut vp, &settings());
    assert!(!ev.contains(&RouterEvent::BackgroundClick));
}

#[test]
fn press_at_exact_epsilon_is_not_a_click() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::mouse(0.0, 0.0), Button::Primary, Modifiers::default(), Tool::Select);
    let ev = r.pointer_up(1, pt(3.0, 4.0), &mut vp, &settings());
    assert!(ev.is_empty());
}

// =============================================================
// Pinch
// =============================================================

#[test]
fn second_pointer_starts_pinch() {
    let (mut r, _) = setup();
    r.pointer_down(1, PointerSample::touch(100.0, 100.0), Button::Primary, Modifiers::default(), Tool::Select);
    r.pointer_down(2, PointerSample::touch(200.0, 100.0), Button::Primary, Modifiers::default(), Tool::Select);
    assert_eq!(r.state(), GestureState::Pinching { distance: 100.0, center: pt(150.0, 100.0) });
    assert_eq!(r.pointer_count(), 2);
}

#[test]
fn pinch_scales_around_center() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::touch(100.0, 100.0), Button::Primary, Modifiers::default(), Tool::Select);
    r.pointer_down(2, PointerSample::touch(200.0, 100.0), Button::Primary, Modifiers::default(), Tool::Select);
    let before = vp.live().screen_to_canvas(pt(150.0, 100.0));

    // Symmetric spread keeps the center fixed and doubles the distance.
    r.pointer_move(1, pt(50.0, 100.0), &mut vp, ORIGIN);
    r.pointer_move(2, pt(250.0, 100.0), &mut vp, ORIGIN);

    assert!(approx_eq(vp.live().zoom, 2.0));
    let after = vp.live().screen_to_canvas(pt(150.0, 100.0));
    assert!(approx_eq(before.x, after.x) && approx_eq(before.y, after.y));
    assert_eq!(vp.committed(), Viewport::default());
}

#[test]
fn pinch_respects_container_origin() {
    let origin = pt(40.0, 30.0);
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::touch(140.0, 130.0), Button::Primary, Modifiers::default(), Tool::Select);
    r.pointer_down(2, PointerSample::touch(240.0, 130.0), Button::Primary, Modifiers::default(), Tool::Select);
    let before = screen_to_canvas(pt(190.0, 130.0), &vp.live(), origin);
    r.pointer_move(2, pt(340.0, 130.0), &mut vp, origin);
    r.pointer_move(1, pt(40.0, 130.0), &mut vp, origin);
    let after = screen_to_canvas(pt(190.0, 130.0), &vp.live(), origin);
    assert!(approx_eq(before.x, after.x) && approx_eq(before.y, after.y));
}

#[test]
fn pinch_zoom_is_clamped() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::touch(100.0, 100.0), Button::Primary, Modifiers::default(), Tool::Select);
    r.pointer_down(2, PointerSample::touch(110.0, 100.0), Button::Primary, Modifiers::default(), Tool::Select);
    r.pointer_move(2, pt(1100.0, 100.0), &mut vp, ORIGIN);
    assert_eq!(vp.live().zoom, 5.0);
}

#[test]
fn lifting_one_finger_reanchors_pan() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::touch(100.0, 100.0), Button::Primary, Modifiers::default(), Tool::Select);
    r.pointer_down(2, PointerSample::touch(200.0, 100.0), Button::Primary, Modifiers::default(), Tool::Select);
    r.pointer_move(2, pt(220.0, 100.0), &mut vp, ORIGIN);
    let ev = r.pointer_up(2, pt(220.0, 100.0), &mut vp, &settings());
    assert!(ev.is_empty());
    assert_eq!(r.state(), GestureState::Panning { last: pt(100.0, 100.0) });

    let live = vp.live();
    r.pointer_move(1, pt(110.0, 100.0), &mut vp, ORIGIN);
    assert!(approx_eq(vp.live().x, live.x + 10.0));
    assert!(approx_eq(vp.live().y, live.y));
}

#[test]
fn pinch_commits_when_last_finger_lifts() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::touch(100.0, 100.0), Button::Primary, Modifiers::default(), Tool::Select);
    r.pointer_down(2, PointerSample::touch(200.0, 100.0), Button::Primary, Modifiers::default(), Tool::Select);
    r.pointer_move(2, pt(300.0, 100.0), &mut vp, ORIGIN);
    r.pointer_up(2, pt(300.0, 100.0), &mut vp, &settings());
    let ev = r.pointer_up(1, pt(100.0, 100.0), &mut vp, &settings());
    assert!(matches!(ev.as_slice(), [RouterEvent::ViewportCommitted(v)] if approx_eq(v.zoom, 2.0)));
    assert!(approx_eq(vp.committed().zoom, 2.0));
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn ctrl_wheel_zooms_at_pointer_and_commits() {
    let (mut r, mut vp) = setup();
    let mods = Modifiers { ctrl: true, ..Default::default() };
    let ev = r.wheel(pt(400.0, 300.0), WheelDelta { dx: 0.0, dy: -200.0 }, mods, &mut vp, ORIGIN, &settings());
    let c = vp.committed();
    assert!(approx_eq(c.zoom, 1.2));
    assert!(approx_eq(c.x, -80.0));
    assert!(approx_eq(c.y, -60.0));
    assert!(ev.iter().any(|e| matches!(e, RouterEvent::ViewportCommitted(_))));
}

#[test]
fn meta_wheel_zooms_relative_to_container() {
    let (mut r, mut vp) = setup();
    let mods = Modifiers { meta: true, ..Default::default() };
    r.wheel(pt(500.0, 350.0), WheelDelta { dx: 0.0, dy: -200.0 }, mods, &mut vp, pt(100.0, 50.0), &settings());
    assert!(approx_eq(vp.committed().x, -80.0));
    assert!(approx_eq(vp.committed().y, -60.0));
}

#[test]
fn wheel_zoom_out_clamps_at_min() {
    let (mut r, mut vp) = setup();
    let mods = Modifiers { ctrl: true, ..Default::default() };
    r.wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: 5000.0 }, mods, &mut vp, ORIGIN, &settings());
    assert_eq!(vp.committed().zoom, 0.1);
}

#[test]
fn plain_wheel_pans_opposite_to_delta() {
    let (mut r, mut vp) = setup();
    r.wheel(pt(0.0, 0.0), WheelDelta { dx: 10.0, dy: 25.0 }, Modifiers::default(), &mut vp, ORIGIN, &settings());
    assert_eq!(vp.committed(), Viewport::new(-10.0, -25.0, 1.0));
}

// =============================================================
// Cursor / reset
// =============================================================

#[test]
fn hover_updates_cursor_in_canvas_space() {
    let (mut r, mut vp) = setup();
    vp.reset(Viewport::new(20.0, 10.0, 2.0));
    let ev = r.pointer_move(1, pt(120.0, 110.0), &mut vp, pt(0.0, 10.0));
    assert_eq!(r.cursor(), pt(50.0, 45.0));
    assert_eq!(ev, vec![RouterEvent::CursorMoved(pt(50.0, 45.0))]);
}

#[test]
fn secondary_finger_does_not_move_cursor() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::touch(0.0, 0.0), Button::Primary, Modifiers::default(), Tool::Select);
    r.pointer_down(2, PointerSample::touch(100.0, 0.0), Button::Primary, Modifiers::default(), Tool::Select);
    let ev = r.pointer_move(2, pt(150.0, 0.0), &mut vp, ORIGIN);
    assert!(!ev.iter().any(|e| matches!(e, RouterEvent::CursorMoved(_))));
}

#[test]
fn reset_drops_pointers_and_live_changes() {
    let (mut r, mut vp) = setup();
    r.pointer_down(1, PointerSample::touch(0.0, 0.0), Button::Primary, Modifiers::default(), Tool::Select);
    r.pointer_move(1, pt(50.0, 0.0), &mut vp, ORIGIN);
    r.reset(&mut vp);
    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.pointer_count(), 0);
    assert_eq!(vp.live(), Viewport::default());
    assert!(r.pointer_up(1, pt(50.0, 0.0), &mut vp, &settings()).is_empty());
}
