//! Boxen Geometry: pure 2D geometry primitives for the panel engine.
//!
//! This crate is the numeric foundation everything else in the Boxen
//! workspace builds on: points, axis-aligned bounds, and closed-polyline
//! operations (winding, signed area, containment). It knows nothing about
//! assemblies, voids, or joints — those live in `boxen_joints` and
//! `boxen_scene`.
//!
//! Coordinates are millimeters in `f64`. [`kurbo`]'s `Point`/`Vec2`/`Rect` are
//! reused for the plane (we never build a [`kurbo::BezPath`] — outlines are
//! polylines only, per the engine's no-curves rule).
//!
//! ## Failure mode
//!
//! Degenerate input (zero-length segments, duplicated consecutive vertices)
//! is fixed at the edges of this crate by [`polygon::dedupe_close`] rather
//! than propagated outward; callers that assemble outlines should run their
//! result through it before handing it to a consumer.

mod bounds;
mod edge_path;
pub mod polygon;
mod vec2;

pub use bounds::Bounds;
pub use edge_path::EdgePathPoint;
pub use vec2::{distance, dot, normalize, perp};

pub use kurbo::{Point, Vec2};

/// Tolerance used for rectangle overlap/containment and general "close enough"
/// comparisons of coordinates, per the engine's geometric invariants.
pub const EPS: f64 = 0.001;

/// Minimum required clearance between a hole and the outline it sits inside.
pub const HOLE_CLEARANCE_MM: f64 = 0.01;

/// Minimum required clearance between joint alignment points for two mating
/// panels, per the engine's alignment invariant.
pub const JOINT_ALIGNMENT_TOLERANCE_MM: f64 = 0.001;
