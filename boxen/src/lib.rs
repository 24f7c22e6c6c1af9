//! Boxen: a parametric geometry engine for laser-cut box designs.
//!
//! This crate is the public facade over the rest of the workspace:
//! [`boxen_scene`] models the scene (assemblies, void tree, overlays),
//! [`boxen_joints`] derives finger-joint geometry and gender/ownership,
//! [`boxen_boolean`] clips panel outlines against user boolean operations,
//! [`boxen_dispatch`] is the action catalog and preview/commit/discard
//! session, and [`boxen_snapshot`] turns a scene into deterministic JSON.
//! [`Engine`] wires all of that into the one surface a consumer (a web
//! viewport, an SVG exporter, a test harness) needs.

mod alignment;
mod engine;

pub use alignment::AlignmentError;
pub use boxen_dispatch::Action;
pub use boxen_scene::{Assembly, Id};
pub use engine::{Engine, Handle};
