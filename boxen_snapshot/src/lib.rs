//! Deterministic serialization of a [`boxen_scene::Scene`] and its generated
//! panels. Owns the one thing `boxen_scene` deliberately defers: turning
//! [`boxen_scene::PanelId`] into a stable string and rounding floats to a
//! fixed number of fractional digits, so the same scene always serializes to
//! the same bytes.

mod float;
mod panel_id;
mod panel_list;
mod scene_snapshot;

pub use panel_id::panel_id_key;
pub use panel_list::{generate_panel_list, CornerEligibilitySnapshot, PanelList, PanelSnapshot, TransformSnapshot};
pub use scene_snapshot::{scene_snapshot, AssemblySnapshot, SceneSnapshot, VoidSnapshot};
