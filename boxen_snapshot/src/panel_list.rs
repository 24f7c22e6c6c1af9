use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use boxen_geom::polygon::signed_area;
use boxen_geom::{Point, EPS};
use boxen_joints::{Axis, EdgeStatus, Face};
use boxen_scene::{Panel, PanelSource, PanelTransform, Scene};

use crate::float::{round6, round6_point};
use crate::panel_id::panel_id_key;

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

fn edge_str(edge: boxen_scene::Edge) -> &'static str {
    match edge {
        boxen_scene::Edge::Top => "top",
        boxen_scene::Edge::Right => "right",
        boxen_scene::Edge::Bottom => "bottom",
        boxen_scene::Edge::Left => "left",
    }
}

fn edge_status_str(status: EdgeStatus) -> &'static str {
    match status {
        EdgeStatus::Open => "open",
        EdgeStatus::MaleJoint => "male_joint",
        EdgeStatus::FemaleJoint => "female_joint",
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelSourceSnapshot {
    Face { face: &'static str },
    Divider { parent_void: u64, axis: &'static str, position: f64 },
}

#[derive(Debug, Serialize)]
pub struct TransformSnapshot {
    pub origin: [f64; 3],
    /// Rotor3 components `(scalar, xy, xz, yz)`, not a quaternion: this is
    /// ultraviolet's native bivector representation, kept as-is rather than
    /// converted to avoid a second, redundant rotation encoding.
    pub rotation: [f64; 4],
}

#[derive(Debug, Serialize)]
pub struct CornerEligibilitySnapshot {
    pub vertex_index: usize,
    pub eligible: bool,
    pub max_radius: f64,
}

#[derive(Debug, Serialize)]
pub struct PanelSnapshot {
    pub id: String,
    pub source: PanelSourceSnapshot,
    pub width: f64,
    pub height: f64,
    pub transform: TransformSnapshot,
    pub outline: Vec<[f64; 2]>,
    pub holes: Vec<Vec<[f64; 2]>>,
    pub corner_eligibility: Vec<CornerEligibilitySnapshot>,
    pub edge_status: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Serialize)]
pub struct PanelList {
    pub panels: Vec<PanelSnapshot>,
    pub generated_at: u64,
}

fn transform_snapshot(transform: PanelTransform) -> TransformSnapshot {
    let rotor = transform.rotation;
    TransformSnapshot {
        origin: [round6(transform.origin.x as f64), round6(transform.origin.y as f64), round6(transform.origin.z as f64)],
        rotation: [round6(rotor.s as f64), round6(rotor.bv.xy as f64), round6(rotor.bv.xz as f64), round6(rotor.bv.yz as f64)],
    }
}

/// A hole is degenerate if it encloses no area or one of its vertices sits
/// on the outline boundary. Such holes are dropped at snapshot time and
/// reported back to the caller instead of being emitted.
fn is_degenerate(hole: &[Point], outline: &[Point]) -> bool {
    if signed_area(hole).abs() < EPS * EPS {
        return true;
    }
    hole.iter().any(|h| outline.iter().any(|o| (h.x - o.x).abs() < EPS && (h.y - o.y).abs() < EPS))
}

fn panel_snapshot(panel: &Panel, alignment_errors: &mut Vec<String>) -> PanelSnapshot {
    let source = match panel.source {
        PanelSource::Face { face } => PanelSourceSnapshot::Face { face: face_str(face) },
        PanelSource::Divider { parent_void, axis, position } => {
            PanelSourceSnapshot::Divider { parent_void: parent_void.get(), axis: axis_str(axis), position: round6(position) }
        }
    };

    let panel_key = panel_id_key(&panel.id);
    let mut holes = Vec::with_capacity(panel.holes.len());
    for (index, hole) in panel.holes.iter().enumerate() {
        if is_degenerate(hole, &panel.outline) {
            alignment_errors.push(format!("panel {panel_key}: degenerate hole #{index} omitted"));
            continue;
        }
        holes.push(hole.iter().copied().map(round6_point).collect());
    }

    PanelSnapshot {
        id: panel_key,
        source,
        width: round6(panel.width),
        height: round6(panel.height),
        transform: transform_snapshot(panel.transform),
        outline: panel.outline.iter().copied().map(round6_point).collect(),
        holes,
        corner_eligibility: panel
            .corner_eligibility
            .iter()
            .map(|e| CornerEligibilitySnapshot { vertex_index: e.vertex_index, eligible: e.eligible, max_radius: round6(e.max_radius) })
            .collect(),
        edge_status: panel.edge_status.iter().map(|(edge, status)| (edge_str(*edge), edge_status_str(*status))).collect(),
    }
}

/// Generate every assembly's panels and wrap them with a generation
/// timestamp. Panel geometry itself is deterministic (driven only by scene
/// state); `generated_at` is wall-clock metadata and is not covered by the
/// snapshot determinism guarantee, which applies to [`crate::scene_snapshot`].
///
/// Returns the panel list alongside any degenerate-geometry messages found
/// along the way (see `DegenerateGeometry` in the error taxonomy); the panel
/// itself is still emitted, just without the offending hole.
pub fn generate_panel_list(scene: &mut Scene) -> (PanelList, Vec<String>) {
    let mut panels = Vec::new();
    let mut alignment_errors = Vec::new();
    for assembly in &mut scene.assemblies {
        for panel in boxen_scene::generate_panels(assembly) {
            panels.push(panel_snapshot(panel, &mut alignment_errors));
        }
    }
    let generated_at = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0);
    (PanelList { panels, generated_at }, alignment_errors)
}
