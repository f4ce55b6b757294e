//! Graph canvas engine for a node-link diagram editor.
//!
//! The engine owns everything about the canvas that is not drawing: the
//! viewport and its screen/canvas mapping, multi-pointer gestures (pan, pinch,
//! node drag, resize), the handle-to-handle connection state machine, edge
//! geometry, and the depth schedule behind the flow animation. A host wires
//! its native input events into [`engine::EngineCore`], draws from
//! [`render::Scene`], and persists whatever the returned [`engine::Action`]s
//! report as changed.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Engine façade [`engine::EngineCore`] and its [`engine::Action`]s |
//! | [`model`] | Nodes, edges, handles and tagged node content |
//! | [`store`] | Node layout store and edge set |
//! | [`viewport`] | Pan/zoom viewport, coordinate conversions, staged controller |
//! | [`staging`] | Live/committed staging buffer |
//! | [`gesture`] | Pointer gesture router (pan, pinch, wheel) |
//! | [`input`] | Input event types, tools and UI state |
//! | [`connection`] | Handle connection state machine |
//! | [`geometry`] | Handle placement and edge beziers |
//! | [`flow`] | Flow animation depth scheduling |
//! | [`render`] | Scene assembly and the pseudo-code renderer |
//! | [`snapshot`] | Snapshot document load/save |
//! | [`config`] | Engine configuration and environment overrides |
//! | [`ids`] | Random short identifiers |
//! | [`error`] | Conditions absorbed by the engine |
//! | [`consts`] | Default numeric constants |

pub mod config;
pub mod connection;
pub mod consts;
pub mod engine;
pub mod error;
pub mod flow;
pub mod geometry;
pub mod gesture;
pub mod ids;
pub mod input;
pub mod model;
pub mod render;
pub mod snapshot;
pub mod staging;
pub mod store;
pub mod viewport;
