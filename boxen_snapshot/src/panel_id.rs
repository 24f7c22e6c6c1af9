use boxen_joints::{Axis, Face};
use boxen_scene::PanelId;

fn axis_str(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "x",
        Axis::Y => "y",
        Axis::Z => "z",
    }
}

fn face_str(face: Face) -> &'static str {
    match face {
        Face::Front => "front",
        Face::Back => "back",
        Face::Left => "left",
        Face::Right => "right",
        Face::Top => "top",
        Face::Bottom => "bottom",
    }
}

/// A deterministic, lexicographically sortable string for a [`PanelId`].
/// Overlays and panel lists are keyed by this string so snapshot JSON has a
/// stable key order independent of hash-map iteration.
pub fn panel_id_key(id: &PanelId) -> String {
    match id {
        PanelId::Face { assembly, face } => format!("face:{}:{}", assembly.get(), face_str(*face)),
        PanelId::Divider { parent_void, axis, position_micro } => {
            format!("divider:{}:{}:{}", parent_void.get(), axis_str(*axis), position_micro)
        }
    }
}
