//! Boxen Joints: finger-joint pattern synthesis and gender/ownership rules.
//!
//! Two concerns live here, both pure and stateless: [`pattern`] turns a
//! length and a set of material constants into the shared tooth anchors an
//! assembly axis uses (and the per-edge polyline derived from them), and
//! [`gender`] decides which side of a face-to-face boundary is male, female,
//! or open. Neither module knows about the scene tree; both are called by
//! `boxen_scene` while it synthesizes a panel outline.

mod gender;
mod pattern;

pub use gender::{
    resolve_face_edge, resolve_sub_assembly_edge, Axis, EdgeStatus, Face, FaceState,
    LidTabDirection,
};
pub use pattern::{axis_anchor_points, finger_joint_path, FingerParams, Gender};
