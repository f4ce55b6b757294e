//! Pointer gesture router: single-pointer pan, two-pointer pinch zoom, wheel.
//!
//! The router owns the pointer cache, the pinch baseline, and the pan anchor.
//! It drives a [`ViewportController`]: every move stages a change on the live
//! viewport, and the canonical viewport is committed only when the last
//! pointer lifts. Wheel input is separate and commits immediately.
//!
//! Pointer coordinates are client (page) coordinates. Zoom anchors are made
//! container-relative by subtracting the container origin supplied by the
//! caller; pan deltas do not depend on it.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use std::collections::BTreeMap;

use crate::input::{Button, Modifiers, PointerId, PointerKind, PointerSample, Tool, WheelDelta};
use crate::viewport::{Point, Viewport, ViewportController, screen_to_canvas};

/// Router state between pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No viewport gesture in progress.
    #[default]
    Idle,
    /// One pointer is dragging the canvas.
    Panning {
        /// Client position at the previous event, used for the pan delta.
        last: Point,
    },
    /// Two pointers are pinching.
    Pinching {
        /// Distance between the pointers at the previous event.
        distance: f64,
        /// Client midpoint of the pointers at the previous event.
        center: Point,
    },
}

/// What a router call did, for the engine to translate into host actions.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterEvent {
    /// The live viewport moved; the host should redraw.
    ViewportMoved,
    /// The canonical viewport changed.
    ViewportCommitted(Viewport),
    /// A press and release on the background without meaningful travel.
    BackgroundClick,
    /// The primary pointer's canvas position changed.
    CursorMoved(Point),
}

/// Tunables the router needs from the engine config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouterSettings {
    pub click_epsilon_px: f64,
    pub wheel_zoom_sensitivity: f64,
}

/// See the module docs.
#[derive(Debug, Clone, Default)]
pub struct PointerGestureRouter {
    pointers: BTreeMap<PointerId, PointerSample>,
    state: GestureState,
    /// Set once a pan or pinch starts; cleared when the last pointer lifts.
    active: bool,
    /// Client position of a background press, for click detection.
    gesture_start: Option<Point>,
    primary: Option<PointerId>,
    cursor: Point,
}

impl PointerGestureRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Number of pointers currently down on the background.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Live canvas position of the primary pointer (or hovering mouse).
    #[must_use]
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Whether a pan or pinch is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Forget every pointer and return to `Idle`, discarding any uncommitted viewport change.
    pub fn reset(&mut self, viewport: &mut ViewportController) {
        self.pointers.clear();
        self.state = GestureState::Idle;
        self.active = false;
        self.gesture_start = None;
        self.primary = None;
        viewport.discard();
    }

    /// A pointer pressed on the canvas background.
    pub fn pointer_down(
        &mut self,
        id: PointerId,
        sample: PointerSample,
        button: Button,
        modifiers: Modifiers,
        tool: Tool,
    ) {
        if self.pointers.is_empty() {
            self.primary = Some(id);
            self.gesture_start = Some(sample.position);
        }
        self.pointers.insert(id, sample);

        match self.pointers.len() {
            2 => {
                // A multi-finger gesture never ends as a click.
                self.gesture_start = None;
                if let Some((distance, center)) = self.pinch_baseline() {
                    self.state = GestureState::Pinching { distance, center };
                    self.active = true;
                }
            }
            1 => {
                let pans = sample.kind == PointerKind::Touch
                    || tool == Tool::Pan
                    || button == Button::Middle
                    || (button == Button::Primary && modifiers.alt);
                if pans {
                    self.state = GestureState::Panning { last: sample.position };
                    self.active = true;
                }
            }
            _ => {}
        }
    }

    /// A pan-tool press that landed on a node, grip, handle or edge. It pans
    /// like a background press but never ends as a background click.
    pub fn pointer_down_on_content(
        &mut self,
        id: PointerId,
        sample: PointerSample,
        button: Button,
        modifiers: Modifiers,
        tool: Tool,
    ) {
        self.pointer_down(id, sample, button, modifiers, tool);
        if self.pointers.len() == 1 {
            self.gesture_start = None;
        }
    }

    /// A pointer moved. Pointers that never pressed on the background only move the cursor.
    pub fn pointer_move(
        &mut self,
        id: PointerId,
        position: Point,
        viewport: &mut ViewportController,
        origin: Point,
    ) -> Vec<RouterEvent> {
        let mut events = Vec::new();

        let tracked = match self.pointers.get_mut(&id) {
            Some(sample) => {
                sample.position = position;
                true
            }
            None => false,
        };

        match self.state {
            GestureState::Pinching { distance, center } if tracked && self.pointers.len() == 2 => {
                if let Some((new_distance, new_center)) = self.pinch_baseline() {
                    if distance > f64::EPSILON {
                        let old_zoom = viewport.live().zoom;
                        let new_zoom = old_zoom * (new_distance / distance);
                        let anchor = Point::new(center.x - origin.x, center.y - origin.y);
                        viewport.zoom_at(anchor, new_zoom);
                        let (dx, dy) = new_center.delta_from(center);
                        viewport.pan_by(dx, dy);
                        events.push(RouterEvent::ViewportMoved);
                    }
                    self.state = GestureState::Pinching { distance: new_distance, center: new_center };
                }
            }
            GestureState::Panning { last } if tracked && self.pointers.len() == 1 => {
                let (dx, dy) = position.delta_from(last);
                viewport.pan_by(dx, dy);
                self.state = GestureState::Panning { last: position };
                events.push(RouterEvent::ViewportMoved);
            }
            _ => {}
        }

        if self.pointers.is_empty() || self.primary == Some(id) {
            self.cursor = screen_to_canvas(position, &viewport.live(), origin);
            events.push(RouterEvent::CursorMoved(self.cursor));
        }
        events
    }

    /// A pointer lifted, was cancelled, or left the container.
    pub fn pointer_up(
        &mut self,
        id: PointerId,
        position: Point,
        viewport: &mut ViewportController,
        settings: &RouterSettings,
    ) -> Vec<RouterEvent> {
        let mut events = Vec::new();
        if self.pointers.remove(&id).is_none() {
            return events;
        }
        if self.primary == Some(id) {
            self.primary = self.pointers.keys().next().copied();
        }

        match self.pointers.len() {
            0 => {
                if let Some(start) = self.gesture_start.take() {
                    if position.distance(start) < settings.click_epsilon_px {
                        events.push(RouterEvent::BackgroundClick);
                    }
                }
                if self.active {
                    if let Some(vp) = viewport.commit() {
                        events.push(RouterEvent::ViewportCommitted(vp));
                    }
                }
                self.active = false;
                self.state = GestureState::Idle;
            }
            1 => {
                if let Some(remaining) = self.pointers.values().next() {
                    if self.active {
                        self.state = GestureState::Panning { last: remaining.position };
                    }
                }
            }
            _ => {
                if let Some((distance, center)) = self.pinch_baseline() {
                    self.state = GestureState::Pinching { distance, center };
                }
            }
        }
        events
    }

    /// Wheel input: ctrl/cmd zooms at the pointer, otherwise pans. Commits immediately.
    pub fn wheel(
        &mut self,
        position: Point,
        delta: WheelDelta,
        modifiers: Modifiers,
        viewport: &mut ViewportController,
        origin: Point,
        settings: &RouterSettings,
    ) -> Vec<RouterEvent> {
        if modifiers.zoom() {
            let new_zoom = viewport.live().zoom - delta.dy * settings.wheel_zoom_sensitivity;
            let anchor = Point::new(position.x - origin.x, position.y - origin.y);
            viewport.zoom_at(anchor, new_zoom);
        } else {
            viewport.pan_by(-delta.dx, -delta.dy);
        }
        let mut events = vec![RouterEvent::ViewportMoved];
        if let Some(vp) = viewport.commit() {
            events.push(RouterEvent::ViewportCommitted(vp));
        }
        events
    }

    /// `(distance, center)` of the first two cached pointers.
    fn pinch_baseline(&self) -> Option<(f64, Point)> {
        let mut it = self.pointers.values();
        let a = it.next()?.position;
        let b = it.next()?.position;
        Some((a.distance(b), a.midpoint(b)))
    }
}
